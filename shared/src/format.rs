//! Small text helpers shared by the notification builders.

/// Join names the way a sentence would: one name verbatim, two joined by
/// the conjunction, three or more as a comma list with the conjunction
/// before the last.
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
