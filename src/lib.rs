// ============================================================================
// NEXUS ONG - SPA ACCESIBLE EN RUST PURO + WEBASSEMBLY
// ============================================================================
// Arquitectura:
// - Views: plantillas HTML por página + registro de plantillas
// - ViewModels: router, menú, formulario y galería de proyectos
// - Services: persistencia en localStorage (JSON por clave)
// - State: AppState compartido con Rc<RefCell> + máquinas de estados puras
// - A11y: región viva, foco, trampas de foco y tema
// - Models: rutas, registros, apoyos y catálogo de proyectos
// ============================================================================

mod a11y;
mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;

// Instancia global de la App durante toda la vida de la página
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging (ENABLE_LOGGING=false deja solo warn/error)
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 {} - Rust Puro + WebAssembly", CONFIG.site_name);

    let mut app = App::new()?;
    app.start()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Anunciar un mensaje en la región viva (llamable desde JavaScript)
#[wasm_bindgen]
pub fn announce(message: &str) {
    APP.with(|app_cell| match app_cell.borrow().as_ref() {
        Some(app) => app.state().announcer.announce(message),
        None => log::warn!("⚠️ [MAIN] App no está inicializada"),
    });
}

/// Página actual del router (llamable desde JavaScript)
#[wasm_bindgen]
pub fn current_page() -> Option<String> {
    APP.with(|app_cell| {
        app_cell
            .borrow()
            .as_ref()
            .and_then(|app| app.state().router.borrow().current().map(str::to_string))
    })
}
