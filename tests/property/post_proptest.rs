//! Property-based tests for post validation and search text

use proptest::prelude::*;
use threadboard::shared::post::{NAME_MIN_LEN, POST_MESSAGE_MIN_LEN, TOPIC_MIN_LEN};
use threadboard::shared::{NewPost, Post, PostId, Reply};

proptest! {
    #[test]
    fn test_valid_lengths_are_accepted(
        name in "[a-zA-Z]{2,40}",
        topic in "[a-zA-Z]{5,60}",
        message in "[a-zA-Z]{10,200}",
    ) {
        let post = NewPost::parse(&name, &topic, &message).unwrap();
        prop_assert_eq!(post.name(), name.as_str());
        prop_assert_eq!(post.topic(), topic.as_str());
        prop_assert_eq!(post.message(), message.as_str());
    }

    #[test]
    fn test_short_topic_is_rejected(topic in "[a-zA-Z]{1,4}") {
        prop_assert!(topic.len() < TOPIC_MIN_LEN);
        let err = NewPost::parse("Ada", &topic, "a long enough message").unwrap_err();
        prop_assert!(err.is_validation());
    }

    #[test]
    fn test_short_name_or_message_is_rejected(name in "[a-z]{0,1}", message in "[a-z]{0,9}") {
        prop_assert!(name.len() < NAME_MIN_LEN && message.len() < POST_MESSAGE_MIN_LEN);
        prop_assert!(NewPost::parse(&name, "Valid topic", "a long enough message").is_err());
        prop_assert!(NewPost::parse("Ada", "Valid topic", &message).is_err());
    }

    #[test]
    fn test_reply_text_is_searchable(needle in "[a-z]{3,12}") {
        let post = Post {
            id: PostId::from(1u64),
            name: "Ada".to_string(),
            topic: "Topic".to_string(),
            message: "Message".to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            reply_count: 1,
            replies: vec![Reply {
                name: "Grace".to_string(),
                message: format!("contains {} inside", needle.to_uppercase()),
                timestamp: "2024-01-01 00:00:01".to_string(),
            }],
        };
        prop_assert!(post.matches(&needle));
    }
}
