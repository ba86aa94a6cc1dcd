//! Token and trivia kinds.
//!
//! Node kinds are generated alongside their typed views in [`crate::ast`].

use std::fmt;

/// Kind of a piece of trivia.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    NewLine,
    SingleLineComment,
    MultiLineComment,
    SkippedText,
}

impl TriviaKind {
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }
}

macro_rules! token_kinds {
    (
        keywords { $($kw:ident => $kw_text:literal),* $(,)? }
        punctuation { $($punct:ident => $punct_text:literal),* $(,)? }
        other { $($other:ident),* $(,)? }
    ) => {
        /// Kind of a token: keywords, punctuators, literals, identifiers,
        /// end-of-file and error tokens.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SyntaxKind {
            $($other,)*
            $($kw,)*
            $($punct,)*
        }

        impl SyntaxKind {
            /// Fixed source text of keywords and punctuators.
            pub const fn text(self) -> Option<&'static str> {
                match self {
                    $(Self::$kw => Some($kw_text),)*
                    $(Self::$punct => Some($punct_text),)*
                    _ => None,
                }
            }

            pub const fn is_keyword(self) -> bool {
                matches!(self, $(Self::$kw)|*)
            }

            pub const fn is_punctuation(self) -> bool {
                matches!(self, $(Self::$punct)|*)
            }

            /// Keyword kind for a reserved word, if `text` is one.
            pub fn keyword_from_text(text: &str) -> Option<Self> {
                match text {
                    $($kw_text => Some(Self::$kw),)*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    keywords {
        // Standard keywords
        BreakKeyword => "break",
        CaseKeyword => "case",
        CatchKeyword => "catch",
        ContinueKeyword => "continue",
        DebuggerKeyword => "debugger",
        DefaultKeyword => "default",
        DeleteKeyword => "delete",
        DoKeyword => "do",
        ElseKeyword => "else",
        FalseKeyword => "false",
        FinallyKeyword => "finally",
        ForKeyword => "for",
        FunctionKeyword => "function",
        IfKeyword => "if",
        InKeyword => "in",
        InstanceOfKeyword => "instanceof",
        NewKeyword => "new",
        NullKeyword => "null",
        ReturnKeyword => "return",
        SwitchKeyword => "switch",
        ThisKeyword => "this",
        ThrowKeyword => "throw",
        TrueKeyword => "true",
        TryKeyword => "try",
        TypeOfKeyword => "typeof",
        VarKeyword => "var",
        VoidKeyword => "void",
        WhileKeyword => "while",
        WithKeyword => "with",
        // Future reserved words
        ClassKeyword => "class",
        ConstKeyword => "const",
        EnumKeyword => "enum",
        ExportKeyword => "export",
        ExtendsKeyword => "extends",
        ImportKeyword => "import",
        SuperKeyword => "super",
        // Future reserved words in strict mode
        ImplementsKeyword => "implements",
        InterfaceKeyword => "interface",
        LetKeyword => "let",
        PackageKeyword => "package",
        PrivateKeyword => "private",
        ProtectedKeyword => "protected",
        PublicKeyword => "public",
        StaticKeyword => "static",
        YieldKeyword => "yield",
    }
    punctuation {
        OpenBraceToken => "{",
        CloseBraceToken => "}",
        OpenParenToken => "(",
        CloseParenToken => ")",
        OpenBracketToken => "[",
        CloseBracketToken => "]",
        DotToken => ".",
        DotDotDotToken => "...",
        SemicolonToken => ";",
        CommaToken => ",",
        LessThanToken => "<",
        GreaterThanToken => ">",
        LessThanEqualsToken => "<=",
        GreaterThanEqualsToken => ">=",
        EqualsEqualsToken => "==",
        EqualsGreaterThanToken => "=>",
        ExclamationEqualsToken => "!=",
        EqualsEqualsEqualsToken => "===",
        ExclamationEqualsEqualsToken => "!==",
        PlusToken => "+",
        MinusToken => "-",
        AsteriskToken => "*",
        PercentToken => "%",
        PlusPlusToken => "++",
        MinusMinusToken => "--",
        LessThanLessThanToken => "<<",
        GreaterThanGreaterThanToken => ">>",
        GreaterThanGreaterThanGreaterThanToken => ">>>",
        AmpersandToken => "&",
        BarToken => "|",
        CaretToken => "^",
        ExclamationToken => "!",
        TildeToken => "~",
        AmpersandAmpersandToken => "&&",
        BarBarToken => "||",
        QuestionToken => "?",
        ColonToken => ":",
        EqualsToken => "=",
        PlusEqualsToken => "+=",
        MinusEqualsToken => "-=",
        AsteriskEqualsToken => "*=",
        PercentEqualsToken => "%=",
        LessThanLessThanEqualsToken => "<<=",
        GreaterThanGreaterThanEqualsToken => ">>=",
        GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
        AmpersandEqualsToken => "&=",
        BarEqualsToken => "|=",
        CaretEqualsToken => "^=",
        SlashToken => "/",
        SlashEqualsToken => "/=",
    }
    other {
        IdentifierName,
        NumericLiteral,
        StringLiteral,
        RegularExpressionLiteral,
        ErrorToken,
        EndOfFileToken,
    }
}

impl SyntaxKind {
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral
                | Self::StringLiteral
                | Self::RegularExpressionLiteral
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
        )
    }

    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::EqualsToken
                | Self::PlusEqualsToken
                | Self::MinusEqualsToken
                | Self::AsteriskEqualsToken
                | Self::PercentEqualsToken
                | Self::LessThanLessThanEqualsToken
                | Self::GreaterThanGreaterThanEqualsToken
                | Self::GreaterThanGreaterThanGreaterThanEqualsToken
                | Self::AmpersandEqualsToken
                | Self::BarEqualsToken
                | Self::CaretEqualsToken
                | Self::SlashEqualsToken
        )
    }

    /// Identifier-like tokens: identifiers and every keyword (usable as property names).
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, Self::IdentifierName) || self.is_keyword()
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "'{text}'"),
            None => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_text_round_trips() {
        for word in ["class", "super", "instanceof", "yield"] {
            let kind = SyntaxKind::keyword_from_text(word).expect("reserved word");
            assert!(kind.is_keyword());
            assert_eq!(kind.text(), Some(word));
        }
        assert_eq!(SyntaxKind::keyword_from_text("module"), None);
    }

    #[test]
    fn punctuation_has_fixed_text() {
        assert_eq!(SyntaxKind::EqualsGreaterThanToken.text(), Some("=>"));
        assert!(SyntaxKind::EqualsGreaterThanToken.is_punctuation());
        assert_eq!(SyntaxKind::IdentifierName.text(), None);
    }
}
