use std::io::{self, Write};

use url::Url;

use super::notice::{Notice, NoticeKind};
use super::view::{CardView, Content};
use super::Screen;

const PLACEHOLDER: &'static str = "No images yet";

/// Links on a card are relative to the service; show them absolute.
fn resolve(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_owned())
}

pub fn draw_notice(out: &mut impl Write, notice: Option<&Notice>) -> io::Result<()> {
    match notice {
        Some(notice) => {
            let tag = match notice.kind {
                NoticeKind::Success => "ok",
                NoticeKind::Error => "error",
            };
            writeln!(out, "[{}] {}", tag, notice.text)
        },
        None => Ok(()),
    }
}

pub fn draw_card(out: &mut impl Write, base: &Url, position: usize, card: &CardView) -> io::Result<()> {
    writeln!(out, "#{:<3} {} (id {})", position, card.filename, card.id)?;
    writeln!(out, "     Size: {}", card.size)?;
    writeln!(out, "     Uploaded: {}", card.uploaded)?;
    writeln!(out, "     Preview: {}", resolve(base, &card.preview.src))?;
    writeln!(out, "     Download: {}", resolve(base, &card.download_href))?;
    Ok(())
}

pub fn draw_gallery(out: &mut impl Write, base: &Url, content: &Content) -> io::Result<()> {
    match content {
        Content::Blank => Ok(()),
        Content::Placeholder => writeln!(out, "{}", PLACEHOLDER),
        Content::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                draw_card(out, base, index + 1, card)?;
            }
            Ok(())
        },
    }
}

/// Full page: message area, busy indicator, file input and gallery.
pub fn draw(out: &mut impl Write, base: &Url, screen: &Screen) -> io::Result<()> {
    draw_notice(out, screen.notice.as_ref())?;
    if screen.busy {
        writeln!(out, "Loading...")?;
    }
    match &screen.selected {
        Some(name) => writeln!(out, "Selected: {} (upload enabled)", name)?,
        None => writeln!(out, "No file selected (upload disabled)")?,
    }
    writeln!(out, "----")?;
    draw_gallery(out, base, &screen.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::view::build_card;
    use crate::service::image::{ImageId, ImageRecord};

    fn base() -> Url {
        Url::parse("http://localhost:8000/").unwrap()
    }

    fn card() -> CardView {
        build_card(&ImageRecord {
            id: ImageId::new("1"),
            filename: "a.png".to_owned(),
            url: "/f/1".to_owned(),
            size: 2048,
            created_at: "2024-01-01T10:00:00Z".to_owned(),
            mime_type: None,
        })
    }

    fn rendered(screen: &Screen) -> String {
        let mut out = Vec::new();
        draw(&mut out, &base(), screen).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn screen(content: Content) -> Screen {
        Screen {
            notice: None,
            busy: false,
            selected: None,
            upload_enabled: false,
            content,
        }
    }

    #[test]
    fn card_links_are_absolute() {
        let text = rendered(&screen(Content::Cards(vec![card()])));
        assert!(text.contains("#1   a.png (id 1)"));
        assert!(text.contains("Size: 2 KB"));
        assert!(text.contains("Preview: http://localhost:8000/f/1"));
        assert!(text.contains("Download: http://localhost:8000/api/images/1/download"));
        assert!(text.contains("upload disabled"));
        assert!(!text.contains(PLACEHOLDER));
    }

    #[test]
    fn placeholder_and_status_lines() {
        let mut page = screen(Content::Placeholder);
        page.busy = true;
        page.selected = Some("cat.png".to_owned());
        page.upload_enabled = true;
        let text = rendered(&page);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Selected: cat.png (upload enabled)"));
    }

    #[test]
    fn blank_gallery_draws_nothing() {
        let mut out = Vec::new();
        draw_gallery(&mut out, &base(), &Content::Blank).unwrap();
        assert!(out.is_empty());
    }
}
