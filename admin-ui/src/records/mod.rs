pub mod actions;
pub mod manager;
pub mod state;

#[cfg(test)]
mod tests;

pub use actions::RecordAction;
pub use manager::{RecordManager, StoreEvent};
pub use state::{EditorState, LoadPhase, StagedFile, TableState, PAGE_SIZES};
