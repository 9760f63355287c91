//! Deterministic textual rendering of tensors.
//!
//! The rendered form is `Tensor(shape=(..), dtype=.., data=<body>)` where
//! the body is a bracketed structure nested one level per dimension. Long
//! dimensions are truncated to their edges once the tensor is large enough
//! overall. Element lookup goes through [`Tensor::buffer_index`], so the
//! printer honors `offset` and per-dimension strides rather than assuming
//! linear layout.

use crate::storage::CpuStorage;
use crate::tensor::Tensor;
use std::fmt;

/// Truncated display is enabled only above this total element count.
const TRUNCATE_THRESHOLD: usize = 64;

/// Number of entries shown at each edge of a truncated dimension. A
/// dimension is truncated only when its extent exceeds `2 * EDGE_ITEMS`.
const EDGE_ITEMS: usize = 5;

/// Renders a tensor to its deterministic textual form.
pub fn render(t: &Tensor) -> String {
    let dims: Vec<String> = t.shape().dims().iter().map(|d| d.to_string()).collect();
    let mut out = format!(
        "Tensor(shape=({}), dtype={}, data=",
        dims.join(", "),
        t.dtype()
    );
    if t.numel() == 0 {
        // Size 0 is not constructible through this crate; handled defensively.
        out.push_str("[])");
        return out;
    }
    if t.ndim() == 0 {
        out.push_str(&format_element(t, &[]));
        out.push(')');
        return out;
    }
    let truncate = t.numel() > TRUNCATE_THRESHOLD;
    let mut indices = vec![0usize; t.ndim()];
    format_dim(t, 0, &mut indices, truncate, &mut out);
    out.push(')');
    out
}

/// Renders an optional tensor, mapping `None` to `Tensor(NULL)`.
///
/// For call sites that hold a possibly-absent tensor and want a printable
/// form either way.
pub fn render_opt(t: Option<&Tensor>) -> String {
    match t {
        Some(t) => render(t),
        None => "Tensor(NULL)".to_string(),
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Recursively formats dimension `dim`, with `indices[..dim]` already fixed
/// by the enclosing levels.
fn format_dim(t: &Tensor, dim: usize, indices: &mut [usize], truncate: bool, out: &mut String) {
    let extent = t.shape().dim(dim);
    let innermost = dim + 1 == t.ndim();

    // Children to emit: a real index, or None for the ellipsis entry.
    let picks: Vec<Option<usize>> = if truncate && extent > 2 * EDGE_ITEMS {
        (0..EDGE_ITEMS)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((extent - EDGE_ITEMS..extent).map(Some))
            .collect()
    } else {
        (0..extent).map(Some).collect()
    };

    out.push('[');
    if innermost {
        for (k, pick) in picks.iter().enumerate() {
            if k > 0 {
                out.push_str(", ");
            }
            match pick {
                Some(i) => {
                    indices[dim] = *i;
                    out.push_str(&format_element(t, indices));
                }
                None => out.push_str("..."),
            }
        }
        out.push(']');
    } else {
        let pad = " ".repeat(dim + 1);
        for (k, pick) in picks.iter().enumerate() {
            if k > 0 {
                out.push(',');
            }
            out.push('\n');
            out.push_str(&pad);
            match pick {
                Some(i) => {
                    indices[dim] = *i;
                    format_dim(t, dim + 1, indices, truncate, out);
                }
                None => out.push_str("..."),
            }
        }
        out.push('\n');
        out.push_str(&" ".repeat(dim));
        out.push(']');
    }
}

/// Formats the element at the given multi-dimensional indices per its dtype:
/// integers in plain decimal, floats via [`format_float`].
fn format_element(t: &Tensor, indices: &[usize]) -> String {
    let idx = t.buffer_index(indices);
    match t.storage() {
        CpuStorage::I32(v) => v[idx].to_string(),
        CpuStorage::I64(v) => v[idx].to_string(),
        CpuStorage::F32(v) => format_float(f64::from(v[idx])),
        CpuStorage::F64(v) => format_float(v[idx]),
    }
}

/// Fixed 4-decimal notation, switching to scientific for magnitudes below
/// 1e-4 (other than exact zero) or above 1e4.
fn format_float(v: f64) -> String {
    if v == 0.0 {
        return "0.0000".to_string();
    }
    let magnitude = v.abs();
    if magnitude < 1e-4 || magnitude > 1e4 {
        format_scientific(v)
    } else {
        format!("{:.4}", v)
    }
}

/// Scientific notation with 4 fractional digits and an explicit signed,
/// zero-padded exponent: `1.2346e+04`.
fn format_scientific(v: f64) -> String {
    let formatted = format!("{:.4e}", v);
    // `{:e}` writes the exponent without a plus sign or padding; rewrite it.
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        // Non-finite values have no exponent; pass them through.
        None => formatted,
    }
}
