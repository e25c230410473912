/// This is the action used in all the examples.
///
/// Not part of the API and can change at any time.
#[doc(hidden)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Push(pub char);

impl crate::Action for Push {
    type Target = String;

    fn apply(&mut self, string: &mut String) -> crate::Result {
        string.push(self.0);
        Ok(true)
    }

    fn undo(&mut self, string: &mut String) -> crate::Result {
        if !string.ends_with(self.0) {
            return Ok(false);
        }
        string.pop();
        Ok(true)
    }

    fn description(&self) -> String {
        format!("push `{}`", self.0)
    }
}
