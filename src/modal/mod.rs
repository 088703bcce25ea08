use crate::assets::AssetResolver;
use crate::render::{escape_html, RenderTarget};
use crate::utils;

pub const CONTAINER: &str = "certificate-modal";

pub trait ModalRecord {
    fn id(&self) -> u64;
    fn image(&self) -> &str;
    fn caption(&self) -> &str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open(u64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInteraction {
    pub scroll_locked: bool,
    pub scroll_y: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    pub fn parse(value: &str) -> Self {
        match value {
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }

    fn confirms(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    CardClicked(u64),
    CardKey { id: u64, key: Key },
    CloseClicked,
    OverlayClicked { on_content: bool },
    KeyDown(Key),
}

pub struct ModalController<T: RenderTarget> {
    target: T,
    assets: AssetResolver,
    state: ModalState,
    image_src: String,
    image_alt: String,
    page: PageInteraction,
    saved: Option<PageInteraction>,
}

impl<T: RenderTarget> ModalController<T> {
    pub fn new(target: T, assets: AssetResolver) -> Self {
        let mut modal = Self {
            target,
            assets,
            state: ModalState::Closed,
            image_src: String::new(),
            image_alt: String::new(),
            page: PageInteraction::default(),
            saved: None,
        };
        modal.paint();
        modal
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn page(&self) -> PageInteraction {
        self.page
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn scroll_to(&mut self, y: u32) {
        if !self.page.scroll_locked {
            self.page.scroll_y = y;
        }
    }

    // Opening while already open only swaps the content.
    pub fn open<R: ModalRecord>(&mut self, id: u64, records: &[R]) -> bool {
        let record = match records.iter().find(|r| r.id() == id) {
            Some(r) => r,
            None => {
                utils::debug(format!("modal: no record with id {id}, ignoring"));
                return false;
            }
        };

        if self.state == ModalState::Closed {
            self.saved = Some(self.page);
            self.page.scroll_locked = true;
        }
        self.image_src = self.assets.resolve(record.image());
        self.image_alt = record.caption().to_string();
        self.state = ModalState::Open(id);
        self.paint();
        true
    }

    pub fn close(&mut self) -> bool {
        if self.state == ModalState::Closed {
            return false;
        }
        self.image_src.clear();
        self.image_alt.clear();
        if let Some(saved) = self.saved.take() {
            self.page = saved;
        }
        self.state = ModalState::Closed;
        self.paint();
        true
    }

    /// Returns whether the event changed anything.
    pub fn handle<R: ModalRecord>(&mut self, event: ModalEvent, records: &[R]) -> bool {
        match event {
            ModalEvent::CardClicked(id) => self.open(id, records),
            ModalEvent::CardKey { id, key } if key.confirms() => self.open(id, records),
            ModalEvent::CardKey { .. } => false,
            ModalEvent::CloseClicked => self.close(),
            ModalEvent::OverlayClicked { on_content: false } => self.close(),
            ModalEvent::OverlayClicked { on_content: true } => false,
            ModalEvent::KeyDown(Key::Escape) => self.close(),
            ModalEvent::KeyDown(_) => false,
        }
    }

    pub fn render_html(&self) -> String {
        let (class, hidden) = match self.state {
            ModalState::Closed => ("modal", "true"),
            ModalState::Open(_) => ("modal open", "false"),
        };
        let alt = escape_html(&self.image_alt);
        format!(
            r#"<div class="{class}" aria-hidden="{hidden}"><div class="modal-content"><button class="modal-close" type="button" aria-label="Close">&times;</button><img class="modal-image" src="{}" alt="{alt}"><p class="modal-caption">{alt}</p></div></div>"#,
            escape_html(&self.image_src)
        )
    }

    fn paint(&mut self) {
        let html = self.render_html();
        self.target.replace_contents(&html);
    }
}
