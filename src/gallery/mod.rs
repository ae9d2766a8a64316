pub mod error;
pub mod file;
pub mod notice;
pub mod render;
pub mod util;
pub mod view;

use crate::prompt::Confirm;
use crate::service::image::ImageId;
use crate::service::ImageService;
use self::error::FlowError;
use self::file::{SelectedFile, Selection};
use self::notice::{Loader, Notice, Notifier};
use self::view::{Action, Content, GalleryView};

const DELETE_QUESTION: &'static str = "Delete this image?";
const LOAD_FAILED: &'static str = "Failed to load image list";
const UPLOAD_FAILED: &'static str = "Upload failed";
const DELETE_FAILED: &'static str = "Delete failed";

/// Everything the page shows at one instant.
#[derive(Debug, Clone)]
pub struct Screen {
    pub notice: Option<Notice>,
    pub busy: bool,
    pub selected: Option<String>,
    pub upload_enabled: bool,
    pub content: Content,
}

/// Owns the UI state and runs the three flows against the image service.
///
/// Each flow shows the busy indicator for exactly the duration of its
/// request, reports its outcome through one notice, and only then touches
/// the gallery.
pub struct Gallery<S, C> {
    service: S,
    confirm: C,
    view: GalleryView,
    selection: Selection,
    notifier: Notifier,
    loader: Loader,
}

impl<S: ImageService, C: Confirm> Gallery<S, C> {
    pub fn new(service: S, confirm: C, notifier: Notifier, loader: Loader) -> Self {
        Gallery {
            service,
            confirm,
            view: GalleryView::new(),
            selection: Selection::default(),
            notifier,
            loader,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &GalleryView {
        &self.view
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn screen(&self) -> Screen {
        Screen {
            notice: self.notifier.current(),
            busy: self.loader.is_busy(),
            selected: self.selection.file().map(|file| file.name().to_owned()),
            upload_enabled: self.selection.upload_enabled(),
            content: self.view.content().clone(),
        }
    }

    pub fn select(&mut self, file: SelectedFile) {
        debug!("Selected {} ({})", file.name(), file.content_type());
        self.selection.select(file);
    }

    pub fn clear_selection(&mut self) {
        self.selection.reset();
    }

    fn fail(&self, err: FlowError) -> FlowError {
        self.notifier.error(err.to_string());
        err
    }

    /// Replaces the gallery with the service's current list. On failure the
    /// previous cards stay as they were.
    pub async fn refresh(&mut self) -> Result<usize, FlowError> {
        let result = {
            let _busy = self.loader.busy();
            self.service.list_images().await
        };
        match result {
            Ok(records) => {
                debug!("Loaded {} images", records.len());
                self.view.replace(&records);
                Ok(records.len())
            },
            Err(err) => Err(self.fail(FlowError::from_api(LOAD_FAILED, err))),
        }
    }

    /// Sends the selected file. A rejected selection never reaches the
    /// service; a successful one is cleared and followed by a refresh.
    pub async fn submit_upload(&mut self) -> Result<(), FlowError> {
        let result = match self.selection.validate() {
            Err(err) => return Err(self.fail(err.into())),
            Ok(file) => {
                info!("Uploading {}...", file.name());
                let _busy = self.loader.busy();
                self.service.upload_image(file).await
            },
        };
        match result {
            Ok(message) => {
                self.notifier.success(message);
                self.selection.reset();
                if let Err(err) = self.refresh().await {
                    debug!("Refresh after upload failed: {}", err);
                }
                Ok(())
            },
            Err(err) => Err(self.fail(FlowError::from_api(UPLOAD_FAILED, err))),
        }
    }

    /// Deletes one image after asking. Returns `Ok(false)` when the user
    /// declined and nothing was sent.
    pub async fn delete_record(&mut self, id: &ImageId) -> Result<bool, FlowError> {
        if !self.confirm.confirm(DELETE_QUESTION) {
            debug!("Deletion of {} declined", id);
            return Ok(false);
        }
        let result = {
            let _busy = self.loader.busy();
            self.service.delete_image(id).await
        };
        match result {
            Ok(message) => {
                self.notifier.success(message);
                if !self.view.remove(id) {
                    debug!("No card shown for {}", id);
                }
                Ok(true)
            },
            Err(err) => Err(self.fail(FlowError::from_api(DELETE_FAILED, err))),
        }
    }

    /// Runs the action wired to a card control.
    pub async fn dispatch(&mut self, action: Action) -> Result<bool, FlowError> {
        match action {
            Action::Delete(id) => self.delete_record(&id).await,
        }
    }
}
