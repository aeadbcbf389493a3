//! Page Model
//!
//! The elements the inbox script works with: a list that incoming messages
//! are rendered into, two coordinate inputs, and a send button.

mod display;
mod input;
mod point;

pub use display::*;
pub use input::*;
pub use point::*;

use crate::{Error, Result};

pub const INBOX_LIST: &str = "inbox-list";
pub const X_INPUT: &str = "x-input";
pub const Y_INPUT: &str = "y-input";
pub const SEND_BUTTON: &str = "send-btn";

pub struct Document {
    inbox: DisplayList,
    x_input: TextInput,
    y_input: TextInput,
}

impl Document {
    pub fn new(sink: Box<dyn RenderSink>) -> Self {
        Self {
            inbox: DisplayList::new(INBOX_LIST, sink),
            x_input: TextInput::new(X_INPUT),
            y_input: TextInput::new(Y_INPUT),
        }
    }

    pub fn inbox(&self) -> &DisplayList {
        &self.inbox
    }

    pub fn inbox_mut(&mut self) -> &mut DisplayList {
        &mut self.inbox
    }

    pub fn input(&self, id: &str) -> Option<&TextInput> {
        match id {
            X_INPUT => Some(&self.x_input),
            Y_INPUT => Some(&self.y_input),
            _ => None,
        }
    }

    /// Replace the value of the input with the given id.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<()> {
        let input = match id {
            X_INPUT => &mut self.x_input,
            Y_INPUT => &mut self.y_input,
            _ => return Err(Error::UnknownElement(id.to_string())),
        };
        input.set_value(value);
        Ok(())
    }

    /// Read both inputs as they are right now.
    pub fn read_point(&self) -> OutboundPoint {
        OutboundPoint::new(self.x_input.parse(), self.y_input.parse())
    }
}
