mod grokipedia;

pub use grokipedia::GrokipediaScraper;
