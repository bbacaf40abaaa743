//! Property-based tests for domain content and request types
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    ChatCompletionRequest, CompletionRequest, ContentItem, ImageSource, InterleavedContent,
    Message, ResponseFormat,
};
use proptest::prelude::*;

fn text_item() -> impl Strategy<Value = ContentItem> {
    "[a-zA-Z0-9 ]{0,24}".prop_map(ContentItem::text)
}

fn image_item() -> impl Strategy<Value = ContentItem> {
    prop_oneof![
        "[a-z]{1,12}".prop_map(|name| ContentItem::image(ImageSource::url(format!(
            "http://example.com/{name}.png"
        )))),
        prop::collection::vec(any::<u8>(), 0..32)
            .prop_map(|bytes| ContentItem::image(ImageSource::data(bytes))),
    ]
}

fn any_item() -> impl Strategy<Value = ContentItem> {
    prop_oneof![text_item(), image_item()]
}

// ============================================================================
// InterleavedContent Property Tests
// ============================================================================

mod content_tests {
    use super::*;

    proptest! {
        #[test]
        fn text_only_content_has_no_media(items in prop::collection::vec(text_item(), 0..8)) {
            let content = InterleavedContent::from(items);
            prop_assert!(!content.has_media());
        }

        #[test]
        fn any_image_makes_content_media(
            mut items in prop::collection::vec(any_item(), 0..8),
            image in image_item(),
            position in any::<prop::sample::Index>(),
        ) {
            let at = position.index(items.len() + 1);
            items.insert(at, image);
            prop_assert!(InterleavedContent::from(items).has_media());
        }

        #[test]
        fn items_preserve_order(items in prop::collection::vec(any_item(), 0..8)) {
            let content = InterleavedContent::from(items.clone());
            prop_assert_eq!(content.items(), items);
        }

        #[test]
        fn flattened_text_has_one_part_per_item(items in prop::collection::vec(image_item(), 1..8)) {
            let text = InterleavedContent::from(items.clone()).as_text();
            prop_assert_eq!(text.matches("<image>").count(), items.len());
        }

        #[test]
        fn bare_text_flattens_to_itself(text in ".{0,64}") {
            prop_assert_eq!(InterleavedContent::from(text.clone()).as_text(), text);
        }
    }
}

// ============================================================================
// Request Property Tests
// ============================================================================

mod request_tests {
    use super::*;

    proptest! {
        #[test]
        fn chat_request_has_media_iff_a_message_does(
            contents in prop::collection::vec(prop::collection::vec(any_item(), 0..4), 0..6)
        ) {
            let expected = contents.iter().flatten().any(ContentItem::is_media);
            let messages = contents.into_iter().map(Message::user).collect();
            let request = ChatCompletionRequest::new("granite", messages);
            prop_assert_eq!(request.has_media(), expected);
        }

        #[test]
        fn completion_request_media_follows_content(items in prop::collection::vec(any_item(), 0..8)) {
            let expected = items.iter().any(ContentItem::is_media);
            let request = CompletionRequest::new("granite", items);
            prop_assert_eq!(request.has_media(), expected);
        }

        #[test]
        fn unknown_format_kind_is_kept(kind in "[a-z_]{1,16}") {
            prop_assume!(kind != "json_schema" && kind != "grammar");
            let json = serde_json::json!({"type": kind});
            let format: ResponseFormat = serde_json::from_value(json).unwrap();
            prop_assert_eq!(format, ResponseFormat::Unrecognized { kind });
        }
    }
}
