use std::{cell::RefCell, io::Cursor};

use super::*;
use crate::foundation::error::PosterErrorKind;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[derive(Default)]
struct MemFetcher {
    template: Option<Vec<u8>>,
    url: Option<Vec<u8>>,
    calls: RefCell<Vec<String>>,
}

impl AssetFetcher for MemFetcher {
    async fn fetch_template(&self, id: TemplateId) -> anyhow::Result<Vec<u8>> {
        self.calls.borrow_mut().push(format!("template:{id}"));
        self.template.clone().context("no template")
    }

    async fn fetch_url(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self.calls.borrow_mut().push(format!("url:{url}"));
        self.url.clone().context("unreachable")
    }
}

#[test]
fn template_fetch_failure_is_template_load() {
    let loader = AssetLoader::new(MemFetcher::default());
    let err = pollster::block_on(loader.load_template(TemplateId::Poster2)).unwrap_err();
    assert_eq!(err.kind(), PosterErrorKind::TemplateLoad);
    assert!(err.to_string().contains("poster2"));
}

#[test]
fn template_decode_failure_is_template_load() {
    let loader = AssetLoader::new(MemFetcher {
        template: Some(b"not a png".to_vec()),
        ..Default::default()
    });
    let err = pollster::block_on(loader.load_template(TemplateId::Poster1)).unwrap_err();
    assert_eq!(err.kind(), PosterErrorKind::TemplateLoad);
}

#[test]
fn user_image_from_url_and_bytes() {
    let loader = AssetLoader::new(MemFetcher {
        url: Some(png_bytes(3, 5)),
        ..Default::default()
    });
    let img = pollster::block_on(
        loader.load_user_image(&ImageSource::parse("https://example.com/me.png")),
    )
    .unwrap();
    assert_eq!((img.width, img.height), (3, 5));

    let img = pollster::block_on(loader.load_user_image(&ImageSource::Bytes(png_bytes(2, 2))))
        .unwrap();
    assert_eq!((img.width, img.height), (2, 2));
    assert_eq!(
        loader.fetcher().calls.borrow().as_slice(),
        &["url:https://example.com/me.png".to_string()]
    );
}

#[test]
fn unreachable_url_is_user_image_load() {
    let loader = AssetLoader::new(MemFetcher::default());
    let err = pollster::block_on(
        loader.load_user_image(&ImageSource::parse("https://unreachable.invalid/x.png")),
    )
    .unwrap_err();
    assert_eq!(err.kind(), PosterErrorKind::UserImageLoad);
}

#[test]
fn data_url_decodes_without_fetching() {
    use base64::Engine as _;

    let loader = AssetLoader::new(MemFetcher::default());
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes(4, 1))
    );
    let img = pollster::block_on(loader.load_user_image(&ImageSource::parse(&uri))).unwrap();
    assert_eq!((img.width, img.height), (4, 1));
    assert!(loader.fetcher().calls.borrow().is_empty());

    let err = pollster::block_on(
        loader.load_user_image(&ImageSource::parse("data:image/png;base64,!!!")),
    )
    .unwrap_err();
    assert_eq!(err.kind(), PosterErrorKind::UserImageLoad);
}

#[test]
fn std_fetcher_reads_templates_and_paths_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    std::fs::write(uploads.join("devfest-poster3.png"), png_bytes(6, 4)).unwrap();
    std::fs::write(dir.path().join("me.png"), png_bytes(1, 1)).unwrap();

    let loader = AssetLoader::new(StdFetcher::new(dir.path(), HttpConfig::default()));
    let tpl = pollster::block_on(loader.load_template(TemplateId::Poster3)).unwrap();
    assert_eq!((tpl.width, tpl.height), (6, 4));

    let missing = pollster::block_on(loader.load_template(TemplateId::Poster4)).unwrap_err();
    assert_eq!(missing.kind(), PosterErrorKind::TemplateLoad);

    let photo = ImageSource::Path(dir.path().join("me.png"));
    let img = pollster::block_on(loader.load_user_image(&photo)).unwrap();
    assert_eq!((img.width, img.height), (1, 1));

    let gone = ImageSource::Path(dir.path().join("gone.png"));
    let err = pollster::block_on(loader.load_user_image(&gone)).unwrap_err();
    assert_eq!(err.kind(), PosterErrorKind::UserImageLoad);
}
