//! Vue single-file components.

use super::{GeneratedFile, OutputDialect, UnitSources};
use crate::assembler::{json_to_js, HandlerBody};
use crate::config::GeneratorConfig;
use crate::context::{EventHandler, GenerationContext, AGGREGATE_STATE};
use crate::error::Result;
use crate::markup::MarkupSyntax;
use crate::templates::{TemplateEngine, VUE_COMPONENT};
use serde::Serialize;

/// Vue dialect using `<script setup>`.
pub struct VueDialect {
    engine: TemplateEngine<'static>,
    use_typescript: bool,
    css_framework: Option<String>,
}

#[derive(Serialize)]
struct ComponentData<'d> {
    name: &'d str,
    markup: &'d str,
    lang: &'static str,
    script: String,
}

impl VueDialect {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtin_templates()?,
            use_typescript: config.typed,
            css_framework: config.css_framework.clone(),
        })
    }

    fn script(&self, unit: &UnitSources<'_>, ctx: &GenerationContext<'_>) -> String {
        let aggregated = ctx.state_aggregation();
        let mut lines = Vec::new();

        if ctx.state_variable_count() > 0 {
            let api = if aggregated { "reactive" } else { "ref" };
            lines.push(format!("import {{ {} }} from 'vue';", api));
        }
        let mut imported: Vec<&str> = Vec::new();
        for id in unit.used_boundaries {
            let Some(info) = ctx.component(id) else {
                continue;
            };
            let name = info.name.as_str();
            if name == unit.name || imported.contains(&name) {
                continue;
            }
            imported.push(name);
            lines.push(format!("import {} from '../{}/{}.vue';", name, name, name));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }

        if aggregated {
            lines.push(format!("const {} = reactive({{", AGGREGATE_STATE));
            for var in ctx.state_variables() {
                lines.push(format!(
                    "  {}: {},",
                    var.identifier,
                    json_to_js(&var.default_value)
                ));
            }
            lines.push("});".to_string());
            lines.push(String::new());
        } else if ctx.state_variable_count() > 0 {
            for var in ctx.state_variables() {
                let type_arg = if self.use_typescript {
                    format!("<{}>", var.state_type.to_typescript())
                } else {
                    String::new()
                };
                lines.push(format!(
                    "const {} = ref{}({});",
                    var.identifier,
                    type_arg,
                    json_to_js(&var.default_value)
                ));
            }
            lines.push(String::new());
        }

        for handler in ctx.event_handlers() {
            lines.push(self.handler(handler, aggregated));
            lines.push(String::new());
        }

        lines.iter().map(|line| format!("{}\n", line)).collect()
    }

    fn handler(&self, handler: &EventHandler, aggregated: bool) -> String {
        let field = handler.state.as_deref().unwrap_or_default();
        let target = if aggregated {
            format!("{}.{}", AGGREGATE_STATE, field)
        } else {
            format!("{}.value", field)
        };

        match HandlerBody::for_handler(handler) {
            HandlerBody::Change => {
                let (params, value) = if self.use_typescript {
                    ("(event: Event)", "(event.target as HTMLInputElement).value")
                } else {
                    ("(event)", "event.target.value")
                };
                format!(
                    "const {} = {} => {{\n  {} = {};\n}};",
                    handler.identifier, params, target, value
                )
            }
            HandlerBody::Toggle => format!(
                "const {} = () => {{\n  {} = !{};\n}};",
                handler.identifier, target, target
            ),
            HandlerBody::Placeholder => format!("const {} = () => {{}};", handler.identifier),
        }
    }
}

impl OutputDialect for VueDialect {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn supports_components(&self) -> bool {
        true
    }

    fn file_extension(&self) -> &'static str {
        "vue"
    }

    fn markup_syntax(&self) -> MarkupSyntax {
        MarkupSyntax::VueTemplate
    }

    fn markup_depth(&self) -> usize {
        1
    }

    fn css_framework(&self) -> Option<&str> {
        self.css_framework.as_deref()
    }

    fn assemble_unit(
        &self,
        unit: &UnitSources<'_>,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<GeneratedFile>> {
        let data = ComponentData {
            name: unit.name,
            markup: unit.markup,
            lang: if self.use_typescript { " lang=\"ts\"" } else { "" },
            script: self.script(unit, ctx),
        };
        let source = self.engine.render(VUE_COMPONENT, &data)?;

        Ok(vec![
            GeneratedFile::new(
                format!("{}/{}.{}", unit.name, unit.name, self.file_extension()),
                source,
            ),
            GeneratedFile::new(format!("{}/{}.css", unit.name, unit.name), unit.styles),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{handler_name, HandlerKind, InteractiveKind, StateType, StateVariable};
    use serde_json::json;

    #[test]
    fn test_single_file_component() {
        let mut ctx = GenerationContext::new();
        ctx.add_state_variable(StateVariable {
            identifier: "faqAccordion".into(),
            state_type: StateType::Boolean,
            default_value: json!(false),
        });
        ctx.add_event_handler(EventHandler {
            identifier: handler_name(HandlerKind::Toggle, "faqAccordion"),
            kind: HandlerKind::Toggle,
            interaction: Some(InteractiveKind::Accordion),
            state: Some("faqAccordion".into()),
        });
        ctx.update_aggregation();

        let dialect = VueDialect::new(&GeneratorConfig::new()).unwrap();
        let files = dialect
            .assemble_unit(
                &UnitSources {
                    name: "Faq",
                    markup: "  <div class=\"faq\"></div>",
                    styles: "",
                    is_sub_component: false,
                    used_boundaries: &[],
                },
                &ctx,
            )
            .unwrap();

        assert_eq!(files[0].path, "Faq/Faq.vue");
        assert_eq!(
            files[0].content,
            "<template>\n  <div class=\"faq\"></div>\n</template>\n\n\
             <script setup lang=\"ts\">\n\
             import { ref } from 'vue';\n\
             \n\
             const faqAccordion = ref<boolean>(false);\n\
             \n\
             const handleFaqAccordionToggle = () => {\n  \
             faqAccordion.value = !faqAccordion.value;\n\
             };\n\
             \n\
             </script>\n\n\
             <style scoped>\n\
             @import './Faq.css';\n\
             </style>\n"
        );
    }
}
