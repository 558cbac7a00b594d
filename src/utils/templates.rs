use crate::error::Result;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use std::sync::Arc;

pub const INDEX: &str = "index";
pub const DETAIL: &str = "detail";
pub const RESULTS: &str = "results";

handlebars_helper!(pluralize: |count: i64| if count == 1 { "" } else { "s" });

/// 页面模板注册表，启动时构建一次后只读共享
#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_helper("pluralize", Box::new(pluralize));

        registry.register_template_string(INDEX, include_str!("../../templates/index.hbs"))?;
        registry.register_template_string(DETAIL, include_str!("../../templates/detail.hbs"))?;
        registry.register_template_string(RESULTS, include_str!("../../templates/results.hbs"))?;

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        Ok(self.registry.render(name, data)?)
    }
}
