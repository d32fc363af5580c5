//! Base HTML template with head/body placeholders.
//!
//! The template is split once at load; composing a page is then two string
//! copies per placeholder with no searching. Only the first occurrence of each
//! marker is a slot, and each slot is filled independently, so injected
//! content can never be mistaken for a marker.

use crate::markup::builder::HtmlFragment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Head,
    Body,
}

/// The hosting page, pre-split around its placeholders.
#[derive(Debug, Clone)]
pub struct BaseTemplate {
    raw: String,
    /// Byte ranges of the located markers, in document order.
    slots: Vec<(Slot, usize, usize)>,
}

impl BaseTemplate {
    pub fn new(raw: impl Into<String>, head_placeholder: &str, body_placeholder: &str) -> Self {
        let raw = raw.into();
        let mut slots = Vec::with_capacity(2);

        if let Some(at) = raw.find(head_placeholder) {
            slots.push((Slot::Head, at, at + head_placeholder.len()));
        }
        if let Some(at) = raw.find(body_placeholder) {
            let overlaps = slots.iter().any(|&(_, start, end)| at < end && start < at + body_placeholder.len());
            if !overlaps {
                slots.push((Slot::Body, at, at + body_placeholder.len()));
            }
        }
        slots.sort_by_key(|&(_, start, _)| start);

        Self { raw, slots }
    }

    /// The template exactly as loaded.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn has_head_slot(&self) -> bool {
        self.slots.iter().any(|&(slot, _, _)| slot == Slot::Head)
    }

    pub fn has_body_slot(&self) -> bool {
        self.slots.iter().any(|&(slot, _, _)| slot == Slot::Body)
    }

    /// Fill the head slot with `global.head + page.head` and the body slot
    /// with `global.body + page.body`.
    pub fn compose(&self, global: &HtmlFragment, page: &HtmlFragment) -> String {
        let mut out = String::with_capacity(
            self.raw.len() + global.head.len() + global.body.len() + page.head.len() + page.body.len(),
        );

        let mut cursor = 0;
        for &(slot, start, end) in &self.slots {
            out.push_str(&self.raw[cursor..start]);
            match slot {
                Slot::Head => {
                    out.push_str(&global.head);
                    out.push_str(&page.head);
                }
                Slot::Body => {
                    out.push_str(&global.body);
                    out.push_str(&page.body);
                }
            }
            cursor = end;
        }
        out.push_str(&self.raw[cursor..]);
        out
    }
}
