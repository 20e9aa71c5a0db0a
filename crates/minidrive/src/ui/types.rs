//! Types and enums used across the UI

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browser,
    FileDetail,
    Help,
}
