#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::constants::RESERVED;

/// True for words that can never name a type.
fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// True for characters that may appear in an identifier.
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Collapses whitespace in a type expression: runs of whitespace disappear
/// unless they separate two words, and every comma is followed by exactly one
/// space. `Map< String ,List<X> >` becomes `Map<String, List<X>>`.
pub fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c == ',' {
            out.push_str(", ");
            pending_space = false;
            continue;
        }
        if pending_space {
            let after_word = out.chars().last().is_some_and(|p| is_word(p) || p == '?');
            if after_word && (is_word(c) || c == '?' || c == '@') {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }

    out
}

/// Name a supertype is matched by: the dotted name as written, with
/// annotations and type arguments removed. Text the grammar does not accept
/// is only whitespace-collapsed.
pub fn reference_name(type_text: &str) -> String {
    decl::reference(type_text).unwrap_or_else(|_| collapse(type_text))
}

peg::parser! {
    /// Grammar for supertype references as they appear after `extends` and
    /// `implements`, e.g. `@NonNull java.util.Map.Entry<K, V>`.
    pub grammar decl() for str {
        /// a single whitespace character
        rule ws() = quiet!{[' ' | '\n' | '\t' | '\r' | '\u{000C}']}

        /// any amount of whitespace, comments included
        rule _() = (ws() / comment())*

        /// a line or block comment
        rule comment()
            = "//" [^ '\n']*
            / "/*" (!"*/" [_])* "*/"

        /// first character of an identifier
        rule ident_start()
            = ['a'..='z' | 'A'..='Z' | '_' | '$']
            / c:[_] {? if c.is_alphabetic() { Ok(()) } else { Err("identifier") } }

        /// any later character of an identifier
        rule ident_char()
            = ['a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$']
            / c:[_] {? if c.is_alphanumeric() { Ok(()) } else { Err("identifier") } }

        /// a word usable as a type name
        rule ident() -> &'input str
            = w:$(ident_start() ident_char()*)
            {? if is_reserved(w) { Err("identifier") } else { Ok(w) } }

        /// balanced parentheses, contents ignored
        rule parens() = "(" (parens() / [^ '(' | ')'])* ")"

        /// balanced angle brackets, contents ignored
        rule angles() = "<" (angles() / [^ '<' | '>'])* ">"

        /// an annotation with optional arguments
        rule annotation() = "@" _ (ident() ++ (_ "." _)) _ parens()?

        /// one segment of a dotted type name, type arguments dropped
        rule segment() -> &'input str
            = (annotation() _)* i:ident() _ angles()? { i }

        /// a supertype reference
        pub rule reference() -> String
            = _ (annotation() _)* s:(segment() ++ (_ "." _)) _ { s.join(".") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_normalizes_type_whitespace() {
        assert_eq!(collapse(" Map< String ,List< X > > "), "Map<String, List<X>>");
        assert_eq!(collapse("List<? extends\n Number>"), "List<? extends Number>");
        assert_eq!(collapse("int [ ]"), "int[]");
    }

    #[test]
    fn references_drop_type_arguments() {
        assert_eq!(reference_name("Comparable<Player>"), "Comparable");
        assert_eq!(reference_name("Base< Map<K, V> >"), "Base");
        assert_eq!(reference_name("java.io.Serializable"), "java.io.Serializable");
        assert_eq!(reference_name("Outer<String>.Inner<Integer>"), "Outer.Inner");
    }

    #[test]
    fn references_drop_annotations_and_comments() {
        assert_eq!(reference_name("@NonNull Named"), "Named");
        assert_eq!(
            reference_name("java.util /* why */ . @A(x = 1) Map<K, V>"),
            "java.util.Map"
        );
    }

    #[test]
    fn unparsable_references_are_kept_collapsed() {
        assert_eq!(reference_name("  class  "), "class");
        assert!(decl::reference("int").is_ok());
        assert!(decl::reference("a..b").is_err());
    }
}
