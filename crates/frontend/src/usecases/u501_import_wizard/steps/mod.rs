mod batch_table;
mod configure_step;
mod confirm_step;
mod done_step;
mod search_step;
mod source_step;

pub use configure_step::ConfigureStep;
pub use confirm_step::ConfirmStep;
pub use done_step::DoneStep;
pub use search_step::SearchStep;
pub use source_step::SourceStep;
