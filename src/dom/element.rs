// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Poner o quitar clase según `on`
pub fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force(class, on).map(|_| ())
}

/// Verificar si tiene clase
pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Obtener atributo
pub fn get_attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// Remover atributo
pub fn remove_attribute(element: &Element, name: &str) -> Result<(), JsValue> {
    element.remove_attribute(name)
}

/// Query selector en todo el documento
pub fn query_selector(selector: &str) -> Result<Option<Element>, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector(selector)
}

/// Query selector all en todo el documento
pub fn query_selector_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector_all(selector)?;
    Ok(node_list_elements(&list))
}

/// Query selector all dentro de un elemento
pub fn query_selector_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(node_list_elements(&root.query_selector_all(selector)?))
}

fn node_list_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Convertir a HtmlElement (focus, dataset, style...)
pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

/// Dar foco a un elemento; false si no es HtmlElement o el navegador lo rechaza
pub fn focus_element(element: &Element) -> bool {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.focus().is_ok(),
        None => false,
    }
}

/// Elemento con foco actual
pub fn active_element() -> Option<Element> {
    document()?.active_element()
}

/// Visible y con caja: display/visibility no ocultos y tamaño > 0
pub fn is_visible(element: &Element) -> bool {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return false;
    };
    if html.offset_width() <= 0 || html.offset_height() <= 0 {
        return false;
    }
    let style = window().and_then(|w| w.get_computed_style(element).ok().flatten());
    match style {
        Some(style) => {
            let display = style.get_property_value("display").unwrap_or_default();
            let visibility = style.get_property_value("visibility").unwrap_or_default();
            display != "none" && visibility != "hidden"
        }
        None => true,
    }
}

pub fn is_disabled(element: &Element) -> bool {
    element.has_attribute("disabled")
}

/// Sigue dentro del documento (no fue eliminado por un re-render)
pub fn is_connected(element: &Element) -> bool {
    element.is_connected()
}

/// `location.hash` actual ("" si no hay)
pub fn location_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

pub fn set_location_hash(hash: &str) -> Result<(), JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .location()
        .set_hash(hash)
}

pub fn set_document_title(title: &str) {
    if let Some(doc) = document() {
        doc.set_title(title);
    }
}

/// Ancho del viewport en px
pub fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Valor de un control de formulario (input, select o textarea)
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    element
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

/// `parent` es `child` o lo contiene
pub fn contains(parent: &Element, child: &Element) -> bool {
    parent.contains(Some(child.unchecked_ref::<web_sys::Node>()))
}
