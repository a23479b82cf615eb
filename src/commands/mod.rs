pub mod completions;
pub mod export;

pub use completions::CompletionsCommand;
pub use export::ExportCommand;
