//! React source assembly.
//!
//! Combines rendered markup with the context's state variables, handlers and
//! referenced components into a component module and its type declarations.

use crate::context::{
    setter_name, EventHandler, GenerationContext, InteractiveKind, StateVariable,
    AGGREGATE_STATE,
};
use crate::error::Result;
use crate::templates::{indent_lines, TemplateEngine, REACT_COMPONENT, REACT_TYPES};
use serde::Serialize;
use std::borrow::Cow;

/// Above this many state variables or handlers, handlers are memoized.
pub const MEMOIZE_THRESHOLD: usize = 3;

/// Output of assembling one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledUnit {
    /// Component module source.
    pub source: String,
    /// Type declarations, present in typed mode.
    pub type_declarations: Option<String>,
}

#[derive(Serialize)]
struct ComponentData<'d> {
    imports: String,
    signature: String,
    body: String,
    markup: Cow<'d, str>,
    exports: String,
}

#[derive(Serialize)]
struct TypesData<'d> {
    name: &'d str,
    imports: String,
    state: String,
    handlers: String,
}

/// What a handler body does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerBody {
    /// Set the bound field from the incoming value.
    Change,
    /// Flip the bound boolean field.
    Toggle,
    /// Empty placeholder.
    Placeholder,
}

impl HandlerBody {
    /// Decide the body from the interaction kind and bound state.
    pub fn for_handler(handler: &EventHandler) -> Self {
        match (handler.interaction, handler.state.as_ref()) {
            (Some(InteractiveKind::Input), Some(_)) => Self::Change,
            (Some(InteractiveKind::Accordion | InteractiveKind::Toggle), Some(_)) => Self::Toggle,
            (None, Some(_)) => Self::Toggle,
            _ => Self::Placeholder,
        }
    }
}

/// Assembles React component units.
pub struct TemplateAssembler<'e, 'r> {
    engine: &'e TemplateEngine<'r>,
    typed: bool,
}

impl<'e, 'r> TemplateAssembler<'e, 'r> {
    pub fn new(engine: &'e TemplateEngine<'r>, typed: bool) -> Self {
        Self { engine, typed }
    }

    /// Assemble the unit `unit_name` from its rendered markup.
    ///
    /// `markup` is expected at component-body depth. `used_boundary_ids` are
    /// the boundaries referenced by that markup, in document order.
    pub fn assemble(
        &self,
        unit_name: &str,
        markup: &str,
        ctx: &GenerationContext<'_>,
        is_sub_component: bool,
        used_boundary_ids: &[String],
    ) -> Result<AssembledUnit> {
        let memoize = ctx.state_variable_count() > MEMOIZE_THRESHOLD
            || ctx.event_handler_count() > MEMOIZE_THRESHOLD;

        let data = ComponentData {
            imports: self.imports(unit_name, ctx, memoize, used_boundary_ids),
            signature: self.signature(unit_name),
            body: self.body(unit_name, ctx, memoize),
            markup: root_expression(markup),
            exports: if is_sub_component {
                String::new()
            } else {
                format!("\nexport default {};\n", unit_name)
            },
        };
        let source = self.engine.render(REACT_COMPONENT, &data)?;

        let type_declarations = if self.typed {
            Some(self.type_declarations(unit_name, ctx)?)
        } else {
            None
        };

        tracing::debug!(
            unit = unit_name,
            memoize,
            aggregated = ctx.state_aggregation(),
            imports = used_boundary_ids.len(),
            "assembled unit"
        );

        Ok(AssembledUnit {
            source,
            type_declarations,
        })
    }

    fn imports(
        &self,
        unit_name: &str,
        ctx: &GenerationContext<'_>,
        memoize: bool,
        used_boundary_ids: &[String],
    ) -> String {
        let mut hooks = Vec::new();
        if memoize && ctx.event_handler_count() > 0 {
            hooks.push("useCallback");
        }
        if ctx.state_variable_count() > 0 {
            hooks.push("useState");
        }

        let mut lines = Vec::new();
        if hooks.is_empty() {
            lines.push("import React from 'react';".to_string());
        } else {
            lines.push(format!("import React, {{ {} }} from 'react';", hooks.join(", ")));
        }

        if self.typed {
            let mut types = vec![format!("{}Props", unit_name)];
            if ctx.state_aggregation() {
                types.push(format!("{}State", unit_name));
            }
            lines.push(format!(
                "import type {{ {} }} from './{}.types';",
                types.join(", "),
                unit_name
            ));
        }

        let mut imported: Vec<&str> = Vec::new();
        for id in used_boundary_ids {
            let Some(info) = ctx.component(id) else {
                continue;
            };
            let name = info.name.as_str();
            if name == unit_name || imported.contains(&name) {
                continue;
            }
            imported.push(name);
            lines.push(format!("import {{ {} }} from '../{}/{}';", name, name, name));
        }

        lines.push(format!("import './{}.css';", unit_name));
        lines.join("\n")
    }

    fn signature(&self, unit_name: &str) -> String {
        if self.typed {
            format!(
                "export const {}: React.FC<{}Props> = ()",
                unit_name, unit_name
            )
        } else {
            format!("export const {} = ()", unit_name)
        }
    }

    fn body(&self, unit_name: &str, ctx: &GenerationContext<'_>, memoize: bool) -> String {
        let mut lines = Vec::new();
        let variables: Vec<&StateVariable> = ctx.state_variables().collect();

        if ctx.state_aggregation() {
            let type_arg = if self.typed {
                format!("<{}State>", unit_name)
            } else {
                String::new()
            };
            lines.push(format!(
                "  const [{}, setState] = useState{}({{",
                AGGREGATE_STATE, type_arg
            ));
            for var in &variables {
                lines.push(format!(
                    "    {}: {},",
                    var.identifier,
                    json_to_js(&var.default_value)
                ));
            }
            lines.push("  });".to_string());
            lines.push(String::new());
        } else if !variables.is_empty() {
            for var in &variables {
                let type_arg = if self.typed {
                    format!("<{}>", var.state_type.to_typescript())
                } else {
                    String::new()
                };
                lines.push(format!(
                    "  const [{}, {}] = useState{}({});",
                    var.identifier,
                    setter_name(&var.identifier),
                    type_arg,
                    json_to_js(&var.default_value)
                ));
            }
            lines.push(String::new());
        }

        for handler in ctx.event_handlers() {
            lines.push(self.handler(handler, ctx.state_aggregation(), memoize));
            lines.push(String::new());
        }

        if lines.is_empty() {
            String::new()
        } else {
            let mut body = lines.join("\n");
            body.push('\n');
            body
        }
    }

    fn handler(&self, handler: &EventHandler, aggregated: bool, memoize: bool) -> String {
        let kind = HandlerBody::for_handler(handler);
        let field = handler.state.as_deref().unwrap_or_default();

        let params = match kind {
            HandlerBody::Change if self.typed => {
                "(event: React.ChangeEvent<HTMLInputElement>)".to_string()
            }
            HandlerBody::Change => "(event)".to_string(),
            _ => "()".to_string(),
        };

        let statement = match (kind, aggregated) {
            (HandlerBody::Change, true) => Some(format!(
                "setState((prev) => ({{ ...prev, {}: event.target.value }}));",
                field
            )),
            (HandlerBody::Change, false) => {
                Some(format!("{}(event.target.value);", setter_name(field)))
            }
            (HandlerBody::Toggle, true) => Some(format!(
                "setState((prev) => ({{ ...prev, {}: !prev.{} }}));",
                field, field
            )),
            (HandlerBody::Toggle, false) => {
                Some(format!("{}((prev) => !prev);", setter_name(field)))
            }
            (HandlerBody::Placeholder, _) => None,
        };

        let closure = match statement {
            Some(statement) => format!("{} => {{\n    {}\n  }}", params, statement),
            None => format!("{} => {{}}", params),
        };

        if memoize {
            format!(
                "  const {} = useCallback({}, []);",
                handler.identifier, closure
            )
        } else {
            format!("  const {} = {};", handler.identifier, closure)
        }
    }

    /// Render the type-declaration unit.
    pub fn type_declarations(&self, unit_name: &str, ctx: &GenerationContext<'_>) -> Result<String> {
        let handlers: Vec<&EventHandler> = ctx.event_handlers().collect();
        let has_change = handlers
            .iter()
            .any(|h| HandlerBody::for_handler(h) == HandlerBody::Change);

        let state = if ctx.state_variable_count() > 0 {
            let mut lines = vec![String::new(), format!("export interface {}State {{", unit_name)];
            for var in ctx.state_variables() {
                lines.push(format!(
                    "  {}: {};",
                    var.identifier,
                    var.state_type.to_typescript()
                ));
            }
            lines.push("}".to_string());
            lines.join("\n") + "\n"
        } else {
            String::new()
        };

        let handlers = handlers
            .iter()
            .map(|h| {
                let signature = if HandlerBody::for_handler(h) == HandlerBody::Change {
                    "(event: ChangeEvent<HTMLInputElement>) => void"
                } else {
                    "() => void"
                };
                format!("  {}: {};\n", h.identifier, signature)
            })
            .collect::<String>();
        let handlers = format!("export interface {}Handlers {{\n{}}}\n", unit_name, handlers);

        let data = TypesData {
            name: unit_name,
            imports: if has_change {
                "import type { ChangeEvent } from 'react';\n\n".to_string()
            } else {
                String::new()
            },
            state,
            handlers,
        };
        self.engine.render(REACT_TYPES, &data)
    }
}

/// Indentation of the returned expression inside the component body.
const RETURN_INDENT: &str = "    ";

/// Markup usable as the component's return expression.
///
/// Roots that collapsed to bare text are wrapped in a fragment and roots that
/// rendered nothing return `null`.
pub fn root_expression(markup: &str) -> Cow<'_, str> {
    let trimmed = markup.trim_start();
    if trimmed.is_empty() {
        return Cow::Owned(format!("{}null", RETURN_INDENT));
    }
    if trimmed.starts_with('<') {
        return Cow::Borrowed(markup);
    }
    let pad = &markup[..markup.len() - trimmed.len()];
    Cow::Owned(format!("{pad}<>\n{}\n{pad}</>", indent_lines(markup, 2)))
}

/// Convert JSON to a JavaScript literal.
///
/// Strings use single quotes. Every other value is already valid JavaScript
/// in its JSON form.
pub fn json_to_js(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
        }
        other => other.to_string(),
    }
}
