use std::path::{Path, PathBuf};

use url::Url;

use crate::service::image::ImageId;

const FALLBACK_NAME: &'static str = "image";

pub fn server_host(server: &Url) -> String {
    server
        .host_str()
        .unwrap_or(server.as_str())
        .to_string()
}

/// Local file name for a download. Only the last component of the name the
/// service reports is kept, so the file always lands in the working
/// directory; the id stands in when nothing usable is left.
pub fn download_name(filename: &str, id: &ImageId) -> PathBuf {
    [filename, id.as_str()]
        .iter()
        .filter_map(|name| Path::new(name).file_name())
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_NAME))
}

#[macro_export]
macro_rules! log_res {
    ( $what:expr, $e:expr ) => {
        match $e {
            Ok(_) => info!("{}: success", $what),
            Err(err) => warn!("{}: {}", $what, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_of_server() {
        assert_eq!(server_host(&Url::parse("http://images.local:8000/").unwrap()), "images.local");
        assert_eq!(server_host(&Url::parse("data:text/plain,x").unwrap()), "data:text/plain,x");
    }

    #[test]
    fn download_name_stays_in_working_directory() {
        let id = ImageId::new("42");
        assert_eq!(download_name("cat.png", &id), PathBuf::from("cat.png"));
        assert_eq!(download_name("/tmp/pwn", &id), PathBuf::from("pwn"));
        assert_eq!(download_name("../../x.png", &id), PathBuf::from("x.png"));
        assert_eq!(download_name("/home/u/.bashrc", &id), PathBuf::from(".bashrc"));
    }

    #[test]
    fn download_name_falls_back_to_id() {
        assert_eq!(download_name("..", &ImageId::new("42")), PathBuf::from("42"));
        assert_eq!(download_name("", &ImageId::new("42")), PathBuf::from("42"));
        assert_eq!(download_name("/", &ImageId::new("../..")), PathBuf::from("image"));
    }
}
