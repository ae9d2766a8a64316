pub mod browse;
pub mod error;
pub mod util;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::gallery::file::SelectedFile;
use crate::gallery::notice::{Loader, Notifier};
use crate::gallery::{render, view::build_card, Gallery};
use crate::prompt::Prompt;
use crate::service::api::Api;
use crate::service::image::ImageId;
use crate::log_res;
use self::browse::{parse_command, Command, HELP};
use self::error::Error;
use self::util::{download_name, server_host};

/// The command line front of the gallery: one shelf per invocation.
pub struct Shelf {
    gallery: Gallery<Api, Prompt>,
    server: url::Url,
}

impl Shelf {
    pub fn new(config: &Config, assume_yes: bool) -> Shelf {
        debug!("Using image service at {}", config.server);
        let gallery = Gallery::new(
            Api::new(config.server.clone()),
            Prompt::new(assume_yes),
            Notifier::new(config.notice_timeout()),
            Loader::new(),
        );
        Shelf {
            gallery,
            server: config.server.clone(),
        }
    }

    fn draw_notice(&self) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render::draw_notice(&mut out, self.gallery.notifier().current().as_ref())?;
        Ok(())
    }

    fn draw_gallery(&self) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render::draw_gallery(&mut out, &self.server, self.gallery.view().content())?;
        Ok(())
    }

    fn draw_screen(&self) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out)?;
        render::draw(&mut out, &self.server, &self.gallery.screen())?;
        Ok(())
    }

    pub async fn list(&mut self) -> Result<(), Error> {
        let result = self.gallery.refresh().await;
        self.draw_notice()?;
        result?;
        self.draw_gallery()
    }

    pub async fn show(&self, id: &str) -> Result<(), Error> {
        let record = self.gallery.service().get_image(&ImageId::new(id)).await?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        render::draw_card(&mut out, &self.server, 1, &build_card(&record))?;
        if let Some(mime_type) = &record.mime_type {
            writeln!(out, "     Type: {}", mime_type)?;
        }
        Ok(())
    }

    pub async fn upload(&mut self, path: &Path) -> Result<(), Error> {
        let file = SelectedFile::open(path).await?;
        self.gallery.select(file);
        let result = self.gallery.submit_upload().await;
        log_res!(format!("Upload of {}", path.display()), &result);
        self.draw_notice()?;
        result?;
        self.draw_gallery()
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), Error> {
        let result = self.gallery.delete_record(&ImageId::new(id)).await;
        log_res!(format!("Deletion of {}", id), &result);
        self.draw_notice()?;
        if let Ok(false) = result {
            info!("Nothing deleted.");
        }
        result?;
        Ok(())
    }

    pub async fn download(&self, id: &str, output: Option<PathBuf>) -> Result<(), Error> {
        let id = ImageId::new(id);
        let api = self.gallery.service();
        let output = match output {
            Some(path) => path,
            None => download_name(&api.get_image(&id).await?.filename, &id),
        };
        info!("Downloading {} from {}...", id, server_host(&self.server));
        let bytes = api.download_image(&id).await?;
        tokio::fs::write(&output, &bytes).await?;
        info!("Saved {} bytes to {}.", bytes.len(), output.display());
        Ok(())
    }

    pub async fn health(&self) -> Result<(), Error> {
        let health = self.gallery.service().health().await?;
        println!("{}: {} {}", server_host(&self.server), health.status, health.message);
        if health.status != "ok" {
            return Err(Error::ShelfError(format!("service reports status {}", health.status)));
        }
        Ok(())
    }

    /// Interactive session mirroring the upload page: the gallery is loaded
    /// once, then redrawn after every command.
    pub async fn browse(&mut self) -> Result<(), Error> {
        info!("Browsing images on {}.", server_host(&self.server));
        log_res!("Initial load", self.gallery.refresh().await);
        let stdin = io::stdin();
        loop {
            self.draw_screen()?;
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.run(command).await,
                Ok(None) => {},
                Err(usage) => println!("{}", usage),
            }
        }
        Ok(())
    }

    async fn run(&mut self, command: Command) {
        match command {
            Command::Select(path) => match SelectedFile::open(&path).await {
                Ok(file) => self.gallery.select(file),
                Err(err) => self.gallery
                    .notifier()
                    .error(format!("Cannot read {}: {}", path.display(), err)),
            },
            Command::Clear => self.gallery.clear_selection(),
            Command::Upload => log_res!("Upload", self.gallery.submit_upload().await),
            Command::Refresh => log_res!("Refresh", self.gallery.refresh().await),
            Command::Delete(key) => match self.gallery.view().lookup(&key) {
                Some(card) => {
                    let action = card.delete.clone();
                    log_res!(format!("Delete {}", key), self.gallery.dispatch(action).await);
                },
                None => println!("No card {}", key),
            },
            Command::Download(key) => match self.gallery.view().lookup(&key) {
                Some(card) => match self.server.join(&card.download_href) {
                    Ok(url) => println!("{}", url),
                    Err(err) => println!("Bad download link {}: {}", card.download_href, err),
                },
                None => println!("No card {}", key),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => {},
        }
    }
}
