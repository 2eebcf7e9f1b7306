//! Directive processor
//!
//! Runs each header directive's handler against the session, then emits the
//! source with the directive lines blanked.

use super::Template;
use crate::application::session::BuildSession;
use crate::domain::services::parse_source;
use crate::error::{ConduitError, ConduitResult};

pub(super) fn render(template: &Template, session: &mut BuildSession<'_>) -> ConduitResult<String> {
    let parsed = parse_source(template.data(), template.path())?;
    let directives = session.env().directives();

    for directive in &parsed.directives {
        let entry = directives
            .get(&directive.name)
            .ok_or_else(|| ConduitError::UndefinedDirective {
                directive: directive.name.clone(),
                file: template.path().to_path_buf(),
            })?;

        if let Some(arity) = entry.arity {
            if directive.args.len() != arity {
                return Err(ConduitError::MalformedArguments {
                    file: template.path().to_path_buf(),
                    line: directive.line + 1,
                    message: format!(
                        "'{}' takes {} argument{}, got {}",
                        directive.name,
                        arity,
                        if arity == 1 { "" } else { "s" },
                        directive.args.len()
                    ),
                });
            }
        }

        tracing::trace!(
            directive = %directive.name,
            args = ?directive.args,
            file = %template.path().display(),
            "running directive"
        );
        (entry.handler)(session, &directive.args)?;
    }

    Ok(parsed.render())
}
