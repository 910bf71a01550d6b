//! Recorded canvas calls.

/// One variant per recorded `Canvas` method.
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
#[rustfmt::skip]
pub enum Call {
    clear { mask: u32 },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::clear { .. } => "clear",
        }
    }
}
