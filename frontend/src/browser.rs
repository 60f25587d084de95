//! Browser-only side effects: file download, clipboard, color scheme.

use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::{document, window};
use name_pair_types::{ExportFormat, PairList, to_text};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offer the export as `ten-nhan-vat.<ext>` through a temporary object URL.
pub fn download(pairs: &PairList, format: ExportFormat) -> Result<(), JsValue> {
    let content = format
        .render(pairs)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let parts = Array::of1(&JsValue::from_str(&content));
    let opts = BlobPropertyBag::new();
    opts.set_type(format.mime_type());
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)?;

    let href = Url::create_object_url_with_blob(&blob)?;
    let link: HtmlAnchorElement = document().create_element("a")?.dyn_into()?;
    link.set_href(&href);
    link.set_download(&format.file_name());
    link.click();
    Url::revoke_object_url(&href)
}

/// Put the plain-text form on the clipboard, whatever format was last exported.
pub async fn copy_text(pairs: &PairList) -> Result<(), JsValue> {
    let text = to_text(pairs);
    let clipboard = Reflect::get(&window().navigator(), &JsValue::from_str("clipboard"))?;
    let write_text: Function =
        Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write_text
        .call1(&clipboard, &JsValue::from_str(&text))?
        .dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

pub fn prefers_dark() -> bool {
    window()
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|m| m.matches())
}

/// Toggle the `dark` class on `<html>`.
pub fn apply_dark(dark: bool) {
    if let Some(root) = document().document_element() {
        let _ = root.class_list().toggle_with_force("dark", dark);
    }
}
