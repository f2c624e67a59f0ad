use gravel_core::{TextEdit, TextSize};
use gravel_syntax::{lambda_at_offset, lambdas, AstNode, LambdaExpression, SyntaxNodePtr};

use crate::closure::closure_text;
use crate::host::{Document, IntentionHost, ReplaceError};

const CONVERT_LAMBDA_TO_CLOSURE: &str = "Convert lambda to closure";

/// Rewrites one lambda expression into a closure literal.
///
/// Only a [`SyntaxNodePtr`] is kept between offering the intention and invoking it,
/// so an intention built against an older tree simply becomes unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertLambdaToClosure {
    lambda: SyntaxNodePtr,
}

impl ConvertLambdaToClosure {
    pub fn new(lambda: &LambdaExpression) -> Self {
        Self {
            lambda: SyntaxNodePtr::from_ast(lambda),
        }
    }

    pub fn target(&self) -> SyntaxNodePtr {
        self.lambda
    }

    pub fn text(&self) -> &'static str {
        self.family_name()
    }

    pub fn family_name(&self) -> &'static str {
        CONVERT_LAMBDA_TO_CLOSURE
    }

    pub fn is_available<H: IntentionHost + ?Sized>(&self, host: &H) -> bool {
        host.resolve_lambda(&self.lambda).is_some()
    }

    /// `Ok(None)` when the lambda is gone or has no body; neither is an error.
    pub fn invoke<H: IntentionHost + ?Sized>(
        &self,
        host: &mut H,
    ) -> Result<Option<TextEdit>, ReplaceError> {
        let Some(lambda) = host.resolve_lambda(&self.lambda) else {
            tracing::debug!(
                target: "gravel.intentions",
                range = ?self.lambda.range(),
                "lambda no longer resolves; skipping conversion"
            );
            return Ok(None);
        };
        let Some(text) = closure_text(&lambda) else {
            tracing::debug!(
                target: "gravel.intentions",
                range = ?self.lambda.range(),
                "lambda has no body; skipping conversion"
            );
            return Ok(None);
        };
        host.replace_with_closure(&lambda, &text).map(Some)
    }
}

/// Intentions offered at `offset`, innermost lambda first.
pub fn intentions_at(document: &Document, offset: TextSize) -> Vec<ConvertLambdaToClosure> {
    let Some(innermost) = lambda_at_offset(&document.syntax(), offset) else {
        return Vec::new();
    };
    innermost
        .syntax()
        .ancestors()
        .filter_map(LambdaExpression::cast)
        .map(|lambda| ConvertLambdaToClosure::new(&lambda))
        .collect()
}

/// Convert every lambda in `document`, outermost and earliest first.
///
/// Each returned edit applies to the text left by the previous one. Lambdas without
/// a body, or whose closure text does not re-parse, are left untouched.
pub fn convert_all(document: &mut Document) -> Result<Vec<TextEdit>, ReplaceError> {
    let mut edits = Vec::new();
    let mut skipped = 0usize;
    let budget = lambdas(&document.syntax()).count();

    for _ in 0..budget {
        let Some(lambda) = lambdas(&document.syntax())
            .filter(|lambda| lambda.body().is_some())
            .nth(skipped)
        else {
            break;
        };

        match ConvertLambdaToClosure::new(&lambda).invoke(document) {
            Ok(Some(edit)) => edits.push(edit),
            Ok(None) => skipped += 1,
            Err(ReplaceError::InvalidClosure(err)) => {
                tracing::debug!(
                    target: "gravel.intentions",
                    range = ?lambda.syntax().text_range(),
                    error = %err,
                    "closure text does not parse; leaving lambda as is"
                );
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(edits)
}
