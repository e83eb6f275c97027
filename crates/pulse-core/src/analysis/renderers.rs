use crate::report::Node;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Renders one `details.items` entry of an opportunity audit into a digest
/// line. Returning `None` drops the item.
pub type ItemRenderer = fn(Node<'_>) -> Option<String>;

lazy_static! {
    static ref RENDERERS: HashMap<&'static str, ItemRenderer> = {
        let mut renderers: HashMap<&'static str, ItemRenderer> = HashMap::new();
        renderers.insert("bootup-time", render_script_item);
        renderers.insert("image-delivery-insight", render_image_item);
        renderers
    };
}

/// Item renderer registered for an audit id. Audits without one contribute
/// no item lines.
pub fn renderer_for(audit_id: &str) -> Option<ItemRenderer> {
    RENDERERS.get(audit_id).copied()
}

fn render_script_item(item: Node<'_>) -> Option<String> {
    let url = item.str("url")?;
    let total = item.f64("total")?;
    Some(format!("  - Script: {}, CPU Time: {:.0}ms", url, total))
}

fn render_image_item(item: Node<'_>) -> Option<String> {
    let sub_items = item.get("subItems");
    if !sub_items.exists() {
        return None;
    }

    let url = item.str("url")?;
    let reason = sub_items
        .get("items")
        .index(0)
        .str("reason")
        .unwrap_or("Optimization needed");
    Some(format!("  - Image: {}, Reason: {}", url, reason))
}
