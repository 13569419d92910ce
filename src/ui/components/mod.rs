pub mod lyrics;
pub mod settings;
pub mod toast;
pub mod track;
