use handlebars::Handlebars;
use serde_json::json;

/// File-based HTML templates with placeholder substitution, compiled into the
/// binary and rendered through handlebars.
pub struct EmailTemplates {
    registry: Handlebars<'static>,
}

impl EmailTemplates {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string("welcome", include_str!("../../templates/welcome.html"))?;
        registry.register_template_string(
            "password_reset",
            include_str!("../../templates/password_reset.html"),
        )?;
        Ok(Self { registry })
    }

    pub fn welcome(&self, name: &str, login_link: &str) -> anyhow::Result<String> {
        Ok(self.registry.render(
            "welcome",
            &json!({ "name": name, "login_link": login_link }),
        )?)
    }

    pub fn password_reset(&self, name: &str, reset_link: &str) -> anyhow::Result<String> {
        Ok(self.registry.render(
            "password_reset",
            &json!({ "name": name, "reset_link": reset_link }),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_render_with_placeholders_filled() {
        let templates = EmailTemplates::new().unwrap();

        let welcome = templates.welcome("Ada", "http://localhost:3000/login").unwrap();
        assert!(welcome.contains("Hi Ada,"));
        assert!(welcome.contains("http://localhost:3000/login"));

        let reset = templates
            .password_reset("Ada", "http://localhost:3000/reset?token=abc")
            .unwrap();
        // Links must come through verbatim, not entity-escaped.
        assert!(reset.contains("http://localhost:3000/reset?token=abc"));
        assert!(!reset.contains("&#x3D;"));
        assert!(!reset.contains("{{"));
    }
}
