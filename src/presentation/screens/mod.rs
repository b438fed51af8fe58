// Headless screen models driven by the front end
pub mod history;
pub mod login;
pub mod main_menu;
pub mod register;
