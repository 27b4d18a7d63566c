/// User-facing messages and questions.
pub trait Notifier {
    /// A failure the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Informational message that must not block anything.
    fn notice(&mut self, message: &str);

    /// Ask a yes/no question. `false` means declined.
    fn confirm(&mut self, prompt: &str) -> bool;
}
