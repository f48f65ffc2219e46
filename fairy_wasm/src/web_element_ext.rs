use crate::web_error_handling::JsResult;


pub trait WebElementExt {
    fn with_text_content(self, text: &str) -> web_sys::Element;
    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element>;

    fn is_displayed(&self) -> bool;
    fn set_displayed(&self, displayed: bool) -> JsResult<()>;

    fn remove_all_children(&self);
}

impl WebElementExt for web_sys::Element {
    fn with_text_content(self, text: &str) -> web_sys::Element {
        self.set_text_content(Some(text));
        self
    }

    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    fn is_displayed(&self) -> bool { !self.class_list().contains("display-none") }

    // Page stylesheet must define `.display-none { display: none; }`.
    fn set_displayed(&self, displayed: bool) -> JsResult<()> {
        self.class_list().toggle_with_force("display-none", !displayed)?;
        Ok(())
    }

    fn remove_all_children(&self) { self.replace_children_with_node_0() }
}
