pub mod filter_panel;
pub mod ingredient_autocomplete;
pub mod navbar;
pub mod portions_dialog;
pub mod recipe_card;
pub mod recipe_picker;
pub mod recipe_view_dialog;
pub mod unit_select;
