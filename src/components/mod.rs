pub mod hooks;
pub mod ui;

mod modal;
mod monkey_loader;
mod note_form;
mod note_list;
mod pagination;
mod search_box;
mod tags_menu;
mod toaster;

pub use modal::Modal;
pub use monkey_loader::MonkeyLoader;
pub use note_form::NoteForm;
pub use note_list::NoteList;
pub use pagination::Pagination;
pub use search_box::SearchBox;
pub use tags_menu::TagsMenu;
pub use toaster::Toaster;
