//! ローカル画像のサムネイル
//!
//! デコードは別スレッドで行い、`poll` でテクスチャに載せる。

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use image::ImageReader;
use tracing::debug;

const THUMB_WIDTH: u32 = 320;
const THUMB_HEIGHT: u32 = 240;

struct ThumbData {
    /// 依頼時の世代。`clear` 以前のものは捨てる
    generation: u64,
    path: String,
    size: [usize; 2],
    pixels: Vec<u8>,
}

pub enum Thumb<'a> {
    Ready(&'a egui::TextureHandle),
    Loading,
    Missing,
}

pub struct Thumbnails {
    textures: HashMap<String, egui::TextureHandle>,
    failed: HashSet<String>,
    inflight: HashSet<String>,
    generation: u64,
    tx: Sender<ThumbData>,
    rx: Receiver<ThumbData>,
}

impl Default for Thumbnails {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            textures: HashMap::new(),
            failed: HashSet::new(),
            inflight: HashSet::new(),
            generation: 0,
            tx,
            rx,
        }
    }
}

impl Thumbnails {
    /// 未読み込みならデコードを依頼して `Loading` を返す
    pub fn lookup(&mut self, path: &str) -> Thumb<'_> {
        if self.failed.contains(path) {
            return Thumb::Missing;
        }
        if !self.textures.contains_key(path) {
            self.request(path);
            return Thumb::Loading;
        }
        match self.textures.get(path) {
            Some(texture) => Thumb::Ready(texture),
            None => Thumb::Loading,
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.inflight.is_empty()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.failed.clear();
        self.inflight.clear();
        self.generation += 1;
    }

    fn request(&mut self, path: &str) {
        if self.inflight.contains(path) {
            return;
        }
        self.inflight.insert(path.to_string());
        let sender = self.tx.clone();
        let path_owned = path.to_string();
        let generation = self.generation;

        std::thread::spawn(move || {
            let image = ImageReader::open(&path_owned).ok().and_then(|r| r.decode().ok());
            let data = match image {
                Some(image) => {
                    let thumb = image.thumbnail(THUMB_WIDTH, THUMB_HEIGHT);
                    ThumbData {
                        generation,
                        path: path_owned,
                        size: [thumb.width() as usize, thumb.height() as usize],
                        pixels: thumb.to_rgba8().into_raw(),
                    }
                }
                None => ThumbData {
                    generation,
                    path: path_owned,
                    size: [0, 0],
                    pixels: Vec::new(),
                },
            };
            let _ = sender.send(data);
        });
    }

    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            if msg.generation != self.generation {
                continue;
            }
            self.inflight.remove(&msg.path);
            if msg.size[0] == 0 || msg.size[1] == 0 {
                debug!(path = %msg.path, "thumbnail decode failed");
                self.failed.insert(msg.path);
                continue;
            }
            let color_image = egui::ColorImage::from_rgba_unmultiplied(msg.size, &msg.pixels);
            let texture = ctx.load_texture(&msg.path, color_image, egui::TextureOptions::default());
            self.textures.insert(msg.path, texture);
        }
    }
}
