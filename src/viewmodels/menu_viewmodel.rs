// ============================================================================
// MENU VIEWMODEL - Menú hamburguesa accesible (móvil)
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, MouseEvent};

use crate::a11y::FocusTrap;
use crate::config::CONFIG;
use crate::dom::{
    add_class, is_activation_key, on_click, on_event, on_keydown, query_selector,
    query_selector_all_in, remove_attribute, remove_class, set_attribute, viewport_width, window,
};
use crate::state::AppState;
use crate::utils::constants::{INTERNAL_LINK_SELECTOR, NAVIGATION_ID};
use crate::utils::i18n::t;

/// ¿El ancho corresponde al layout móvil (menú plegado)?
pub fn is_mobile_layout(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

pub struct MenuViewModel {
    state: AppState,
    hamburger: Element,
    header: Element,
    nav: Element,
    nav_list: Element,
    trap: FocusTrap,
}

impl MenuViewModel {
    /// None si falta algún elemento del menú (se registra un aviso)
    pub fn init(state: &AppState) -> Result<Option<Rc<Self>>, JsValue> {
        let hamburger = query_selector(".hamburger")?;
        let header = query_selector("header")?;
        let nav = query_selector("nav")?;
        let nav_list = query_selector(".nav-list")?;

        let (Some(hamburger), Some(header), Some(nav), Some(nav_list)) = (hamburger, header, nav, nav_list)
        else {
            log::warn!("⚠️ [MENU] Elementos del menú hamburguesa no encontrados");
            return Ok(None);
        };

        let trap = FocusTrap::menu(&nav, &hamburger, &state.announcer);
        let vm = Rc::new(Self {
            state: state.clone(),
            hamburger,
            header,
            nav,
            nav_list,
            trap,
        });

        vm.setup_aria()?;
        vm.wire_events()?;

        let on_close = vm.clone();
        vm.trap.set_on_close(move || on_close.apply_closed());
        *state.menu.borrow_mut() = Some(vm.trap.clone());

        log::info!("🍔 [MENU] Menú hamburguesa inicializado");
        Ok(Some(vm))
    }

    fn items(&self) -> Vec<Element> {
        query_selector_all_in(&self.nav_list, INTERNAL_LINK_SELECTOR).unwrap_or_default()
    }

    fn setup_aria(&self) -> Result<(), JsValue> {
        set_attribute(&self.hamburger, "aria-haspopup", "true")?;
        set_attribute(&self.hamburger, "aria-expanded", "false")?;
        set_attribute(&self.hamburger, "aria-controls", NAVIGATION_ID)?;
        set_attribute(&self.hamburger, "aria-label", &t("menu_abrir"))?;

        self.nav.set_id(NAVIGATION_ID);
        set_attribute(&self.nav, "aria-label", &t("menu_navegacao"))?;
        set_attribute(&self.nav_list, "role", "menubar")?;
        for item in self.items() {
            set_attribute(&item, "role", "menuitem")?;
        }
        self.sync_item_tabindex(false);
        Ok(())
    }

    /// Ítems fuera del orden de tabulación solo con el menú móvil cerrado
    fn sync_item_tabindex(&self, open: bool) {
        let collapsed = is_mobile_layout(viewport_width(), CONFIG.menu_config.breakpoint_px);
        for item in self.items() {
            let _ = if collapsed && !open {
                set_attribute(&item, "tabindex", "-1")
            } else {
                remove_attribute(&item, "tabindex")
            };
        }
    }

    fn wire_events(self: &Rc<Self>) -> Result<(), JsValue> {
        let vm = self.clone();
        on_click(&self.hamburger, move |event: MouseEvent| {
            event.prevent_default();
            vm.toggle();
        })?;

        let vm = self.clone();
        on_keydown(&self.hamburger, move |event: KeyboardEvent| {
            if is_activation_key(&event) {
                event.prevent_default();
                vm.toggle();
            } else if event.key() == "Escape" && vm.trap.is_open() {
                event.prevent_default();
                vm.close();
            }
        })?;

        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let vm = self.clone();
        on_event(&win, "resize", move |_: Event| {
            let breakpoint = CONFIG.menu_config.breakpoint_px;
            if !is_mobile_layout(viewport_width(), breakpoint) && vm.trap.is_open() {
                log::debug!("🍔 [MENU] Viewport > {}px, cerrando menú", breakpoint);
                vm.close();
            } else {
                vm.sync_item_tabindex(vm.trap.is_open());
            }
        })?;
        Ok(())
    }

    pub fn toggle(&self) {
        if self.trap.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        let _ = add_class(&self.header, "open");
        if let Some(nav) = self.nav.dyn_ref::<HtmlElement>() {
            let _ = nav.style().set_property("display", "block");
        }
        let _ = set_attribute(&self.hamburger, "aria-expanded", "true");
        let _ = set_attribute(&self.hamburger, "aria-label", &t("menu_fechar"));
        let _ = set_attribute(&self.nav, "aria-hidden", "false");
        self.sync_item_tabindex(true);

        if let Err(e) = self.trap.open() {
            log::error!("❌ [MENU] No se pudo abrir la trampa de foco: {:?}", e);
            return;
        }
        self.state.announcer.announce(&t("menu_aberto"));
    }

    pub fn close(&self) {
        // apply_closed se ejecuta vía on_close de la trampa
        self.trap.close();
    }

    fn apply_closed(&self) {
        let _ = remove_class(&self.header, "open");
        if let Some(nav) = self.nav.dyn_ref::<HtmlElement>() {
            let _ = nav.style().remove_property("display");
        }
        let _ = set_attribute(&self.hamburger, "aria-expanded", "false");
        let _ = set_attribute(&self.hamburger, "aria-label", &t("menu_abrir"));
        let _ = remove_attribute(&self.nav, "aria-hidden");
        self.sync_item_tabindex(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundary() {
        assert!(is_mobile_layout(375.0, 768.0));
        assert!(is_mobile_layout(768.0, 768.0));
        assert!(!is_mobile_layout(769.0, 768.0));
    }
}
