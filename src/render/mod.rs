pub mod templates;

use std::cell::RefCell;
use std::rc::Rc;

use crate::utils;

pub trait RenderTarget {
    fn replace_contents(&mut self, html: &str);
}

impl RenderTarget for String {
    fn replace_contents(&mut self, html: &str) {
        self.clear();
        self.push_str(html);
    }
}

/// Cloning the handle aliases the same element.
#[derive(Clone, Debug, Default)]
pub struct Container {
    inner: Rc<RefCell<String>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.inner.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl RenderTarget for Container {
    fn replace_contents(&mut self, html: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.clear();
        inner.push_str(html);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Document {
    containers: Vec<(String, Container)>,
}

impl Document {
    pub fn with_containers(ids: &[&str]) -> Self {
        Self {
            containers: ids
                .iter()
                .map(|id| (id.to_string(), Container::new()))
                .collect(),
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.containers.iter().any(|(k, _)| k == id)
    }

    pub fn container(&self, id: &str) -> Option<Container> {
        self.containers
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, c)| c.clone())
    }

    /// Replaces the contents of `id`. A missing element is skipped.
    pub fn render(&self, id: &str, html: &str) -> bool {
        match self.container(id) {
            Some(mut c) => {
                c.replace_contents(html);
                true
            }
            None => {
                utils::debug(format!("no #{id} on this page, skipping"));
                false
            }
        }
    }

    pub fn contents(&self, id: &str) -> Option<String> {
        self.container(id).map(|c| c.contents())
    }
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}
