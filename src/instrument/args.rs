//! Rendering of call arguments as a positional tuple literal.

use crate::value::{repr_text, Value};

/// Arguments that can be recorded in a call history.
pub trait CallArgs {
    /// Tuple literal of the positional arguments: `()`, `('a',)`, `('a', 2)`.
    fn render(&self) -> String;
}

fn render_tuple(items: &[String]) -> String {
    match items {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        many => format!("({})", many.join(", ")),
    }
}

impl CallArgs for () {
    fn render(&self) -> String {
        render_tuple(&[])
    }
}

impl CallArgs for Value {
    fn render(&self) -> String {
        render_tuple(&[self.repr()])
    }
}

impl CallArgs for Vec<Value> {
    fn render(&self) -> String {
        let items: Vec<String> = self.iter().map(Value::repr).collect();
        render_tuple(&items)
    }
}

impl CallArgs for String {
    fn render(&self) -> String {
        render_tuple(&[repr_text(self)])
    }
}

impl CallArgs for i64 {
    fn render(&self) -> String {
        render_tuple(&[self.to_string()])
    }
}
