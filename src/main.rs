use receitas::app::App;
use receitas::config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();
    receitas::logging::init(&AppConfig::load().log_level);
    leptos::mount::mount_to_body(App);
}
