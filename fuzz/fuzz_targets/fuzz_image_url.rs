#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) { Ok(x) => x, Err(_) => return };
    let n = storefront_import::media::ImageUrlNormalizer::default();
    let _ = n.normalize(s);
    let _ = n.cdn_image_url(s, None);
    let _ = n.responsive_src_set(s);
});
