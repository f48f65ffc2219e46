use fairy_board::ui::{ConnectionStatus, GameResultText, GameUi, Roster};
use wasm_bindgen::prelude::*;

use crate::web_document::WebDocument;
use crate::web_element_ext::WebElementExt;
use crate::web_error_handling::{JsResult, log_js_error};


pub const ARMIES_ID: &str = "armies";
pub const NAME_US_ID: &str = "nameUs";
pub const NAME_THEM_ID: &str = "nameThem";
pub const RESULT_ID: &str = "result";
pub const CONNECTION_STATUS_ID: &str = "connection-status";

pub struct DomUi {
    document: WebDocument,
    armies: web_sys::HtmlSelectElement,
    name_us: web_sys::Element,
    name_them: web_sys::Element,
    result: web_sys::Element,
    connection_status: web_sys::Element,
}

impl DomUi {
    pub fn new(document: WebDocument) -> JsResult<Self> {
        let armies: web_sys::HtmlSelectElement =
            document.get_existing_element_by_id(ARMIES_ID)?.dyn_into()?;
        let name_us = document.get_existing_element_by_id(NAME_US_ID)?;
        let name_them = document.get_existing_element_by_id(NAME_THEM_ID)?;
        let result = document.get_existing_element_by_id(RESULT_ID)?;
        let connection_status = document.get_existing_element_by_id(CONNECTION_STATUS_ID)?;
        Ok(DomUi {
            document,
            armies,
            name_us,
            name_them,
            result,
            connection_status,
        })
    }

    pub fn selected_army(&self) -> Option<String> {
        let army = self.armies.value();
        (!army.is_empty()).then_some(army)
    }

    fn populate_armies(&self, armies: &[String]) -> JsResult<()> {
        self.armies.remove_all_children();
        for army in armies {
            let option = self
                .document
                .create_element("option")?
                .with_attribute("value", army)?
                .with_text_content(army);
            self.armies.append_child(&option)?;
        }
        Ok(())
    }

    fn show_result(&self, result: &GameResultText) -> JsResult<()> {
        self.result.set_text_content(Some(result.text()));
        self.result.set_displayed(result.is_visible())
    }

    fn show_connection_status(&self, status: ConnectionStatus) -> JsResult<()> {
        let text = match status {
            ConnectionStatus::Connecting => "Connecting…",
            ConnectionStatus::Open => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        };
        self.connection_status.set_text_content(Some(text));
        let class_list = self.connection_status.class_list();
        for other in ConnectionStatus::ALL {
            class_list.toggle_with_force(other.as_str(), other == status)?;
        }
        Ok(())
    }
}

impl GameUi for DomUi {
    fn set_army_options(&mut self, armies: &[String]) {
        log_js_error("Cannot update army list", self.populate_armies(armies));
    }

    fn set_roster(&mut self, roster: &Roster) {
        self.name_us.set_text_content(Some(&roster.us));
        self.name_them.set_text_content(Some(&roster.them));
    }

    fn set_result(&mut self, result: &GameResultText) {
        log_js_error("Cannot update result", self.show_result(result));
    }

    fn set_connection_status(&mut self, status: ConnectionStatus) {
        log_js_error("Cannot update connection status", self.show_connection_status(status));
    }
}
