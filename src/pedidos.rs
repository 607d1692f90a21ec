//! Pedido extraction from freeform text.

use std::collections::BTreeSet;

use crate::constants::format::{EMPTY_PREVIEW, PEDIDO_SEPARATOR};
use crate::types::PedidoId;

/// Extract the distinct digit runs from `text`, sorted lexicographically.
///
/// Every run of non-digit characters acts as a separator, so `123-A` yields
/// `123`. Ordering is string ordering (`"100" < "99"`), which downstream
/// exports rely on. Empty or digit-free input yields an empty list.
pub fn parse_pedidos(text: &str) -> Vec<PedidoId> {
    text.split(|ch: char| !ch.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Join pedidos the way previews and bucket segments show them (`1, 2, 3`).
pub fn render_pedidos<T: AsRef<str>>(pedidos: &[T]) -> String {
    pedidos
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PEDIDO_SEPARATOR)
}

/// Preview line for a text box: the parsed pedidos, or a notice when none parse.
pub fn preview_line(text: &str) -> String {
    let parsed = parse_pedidos(text);
    if parsed.is_empty() {
        EMPTY_PREVIEW.to_string()
    } else {
        render_pedidos(&parsed)
    }
}
