// ============================================================================
// Nav Core - Manifest Normalizer
// File: crates/nav-core/src/services/manifest_normalizer.rs
// ============================================================================
//! Maps heterogeneous backend payloads onto the canonical `MenuItem` shape

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{MenuId, MenuItem};

const ID_KEYS: &[&str] = &["id", "menu_id"];
const TITLE_KEYS: &[&str] = &["title", "menu_title", "menu_name", "name"];
const PATH_KEYS: &[&str] = &["path", "menu_path", "menu_url"];
const ICON_KEYS: &[&str] = &["icon", "menu_icon"];
const PARENT_KEYS: &[&str] = &["parentId", "parent_id", "menu_parent_id", "parent_menu_id"];
const ORDER_KEYS: &[&str] = &["order", "menu_order", "sort_order"];
const ROLE_KEYS: &[&str] = &["roles", "menu_roles"];
const ACTIVE_KEYS: &[&str] = &["isActive", "is_active"];
const COMPONENT_KEYS: &[&str] = &["component", "menu_component"];

/// Never fails: a payload without a locatable list yields an empty manifest.
pub fn normalize_manifest(raw: &Value) -> Vec<MenuItem> {
    let Some(list) = locate_list(raw) else {
        warn!("Menu payload contains no item list, using empty manifest");
        return Vec::new();
    };

    let mut items = Vec::with_capacity(list.len());
    let mut seen = HashSet::new();
    for entry in list {
        flatten_entry(entry, None, &mut items, &mut seen);
    }

    debug!("Normalized {} menu items", items.len());
    items
}

/// Bare list, or a list nested under `menu` / `data` wrappers.
fn locate_list(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(list) => Some(list),
        Value::Object(obj) => {
            if let Some(menu) = obj.get("menu").filter(|v| is_present(v)) {
                locate_list(menu)
            } else if let Some(data) = obj.get("data").filter(|v| is_present(v)) {
                locate_list(data)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Pre-order walk so parents precede their nested children in fetch order.
fn flatten_entry(
    entry: &Value,
    enclosing: Option<&MenuId>,
    out: &mut Vec<MenuItem>,
    seen: &mut HashSet<MenuId>,
) {
    let Value::Object(obj) = entry else {
        warn!("Skipping non-object menu entry: {}", entry);
        return;
    };

    let item = normalize_entry(obj, enclosing);
    let own_id = item.as_ref().map(|i| i.id.clone());

    match item {
        Some(item) if !seen.insert(item.id.clone()) => {
            warn!("Duplicate menu id {}, keeping first occurrence", item.id);
        }
        Some(item) => out.push(item),
        None => warn!("Skipping menu entry without id"),
    }

    if let Some(Value::Array(children)) = obj.get("children") {
        for child in children {
            flatten_entry(child, own_id.as_ref(), out, seen);
        }
    }
}

fn normalize_entry(obj: &Map<String, Value>, enclosing: Option<&MenuId>) -> Option<MenuItem> {
    let id = field(obj, ID_KEYS).and_then(to_menu_id)?;

    let parent_id = match field(obj, PARENT_KEYS) {
        Some(value) => to_menu_id(value).filter(|p| !is_null_parent(p)),
        None => enclosing.cloned(),
    };

    Some(MenuItem {
        id,
        title: string_field(obj, TITLE_KEYS).unwrap_or_default(),
        path: string_field(obj, PATH_KEYS),
        icon: string_field(obj, ICON_KEYS),
        parent_id,
        order: field(obj, ORDER_KEYS).and_then(to_order).unwrap_or(0),
        roles: field(obj, ROLE_KEYS).map(to_roles).unwrap_or_default(),
        is_active: field(obj, ACTIVE_KEYS).map(to_active).unwrap_or(true),
        component: string_field(obj, COMPONENT_KEYS),
        children: Vec::new(),
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// First alias carrying a usable value.
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| obj.get(*k)).find(|v| is_present(v))
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(obj, keys).and_then(|v| v.as_str()).map(|s| s.trim().to_string())
}

fn to_menu_id(value: &Value) -> Option<MenuId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(MenuId::Number),
        Value::String(s) if !s.trim().is_empty() => Some(MenuId::Text(s.trim().to_string())),
        _ => None,
    }
}

/// `0` and `""` are how some backends spell "no parent".
fn is_null_parent(id: &MenuId) -> bool {
    match id {
        MenuId::Number(n) => *n == 0,
        MenuId::Text(s) => s.is_empty() || s == "0",
    }
}

fn to_order(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_roles(value: &Value) -> Vec<String> {
    match value {
        Value::Array(list) => list
            .iter()
            .filter_map(|r| r.as_str())
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn to_active(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() != Some(0),
        Value::String(s) => !matches!(s.trim(), "false" | "0"),
        _ => true,
    }
}
