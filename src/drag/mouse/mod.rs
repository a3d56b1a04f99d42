pub use self::click::handle_drag_buttons;
pub use self::motion::advance_drag;

mod click;
mod motion;
