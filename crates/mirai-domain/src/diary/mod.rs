mod entry;
mod repository;


pub use entry::{DiaryEntry, DiaryEntryDraft};
pub use repository::DiaryEntryRepository;
