/// End-to-end integration tests for the chat archive parser
///
/// These tests verify complete workflows: archive text → processed conversations → projects
mod common;

use chat_archive_explorer::{
    ArchiveStats, ParseErrorKind, ParseOptions, Role, parse_archive, parse_archive_file,
    parse_archive_with_options,
};
use common::{ArchiveBuilder, ConversationBuilder, NodeBuilder};
use serde_json::json;

fn realistic_archive() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .with_conversation(
            ConversationBuilder::new("conv-1")
                .title("Mars Mission Plan")
                .created(1_704_067_200.0)
                .project("g-p-111aaa-mars")
                .model("gpt-4o")
                .thread(&[("user", "How long is the trip to Mars?"), ("assistant", "About seven months.")]),
        )
        .with_conversation(
            ConversationBuilder::new("conv-2")
                .title("Weekend errands")
                .created(1_706_745_600.0)
                .model("o1")
                .starred()
                .thread(&[("user", "Make me a list"), ("assistant", "Milk, eggs, bread")]),
        )
        .with_conversation(
            ConversationBuilder::new("conv-3")
                .title("Mars Mission Budget")
                .created(1_709_251_200.0)
                .project("g-p-111aaa-mars")
                .archived()
                .thread(&[("user", "Estimate the fuel cost")]),
        )
}

#[test]
fn test_e2e_parse_realistic_archive() {
    let json = realistic_archive().to_json_string();
    let outcome = parse_archive(&json, "conversations.json");

    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    let archive = outcome.archive.expect("archive should be produced");

    assert_eq!(archive.source.name, "conversations.json");
    assert_eq!(archive.source.size_bytes, json.len());
    assert_eq!(archive.total_conversations, 3);
    assert_eq!(archive.total_projects, 1);

    let ids: Vec<&str> = archive.conversations.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["conv-1", "conv-2", "conv-3"]);
    for (i, conversation) in archive.conversations.iter().enumerate() {
        assert_eq!(conversation.original_index, i);
    }

    let first = &archive.conversations[0];
    assert_eq!(first.formatted_date, "2024-01-01");
    assert_eq!(first.messages.len(), 2);
    assert_eq!(first.messages[0].role, Role::User);
    assert!(first.messages[0].is_first_message);
    assert!(!first.messages[1].is_first_message);
    assert_eq!(first.messages[1].content, "About seven months.");
    assert_eq!(first.messages[1].parent_id.as_deref(), Some("n1"));
}

#[test]
fn test_e2e_projects_are_named_and_ordered() {
    let archive =
        parse_archive(&realistic_archive().to_json_string(), "conversations.json").archive.unwrap();

    let project = archive.project("g-p-111aaa-mars").expect("project should exist");
    assert_eq!(project.name, "Mars Mission Plan");
    assert_eq!(project.conversation_ids, ["conv-1", "conv-3"]);
    assert_eq!(project.conversation_count, 2);
    assert_eq!(project.titles, ["Mars Mission Plan", "Mars Mission Budget"]);
    assert_eq!(project.first_conversation_index, 0);

    let standalone: Vec<&str> = archive.standalone_conversations().map(|c| c.id.as_str()).collect();
    assert_eq!(standalone, ["conv-2"]);
}

#[test]
fn test_e2e_bad_records_are_reported_not_fatal() {
    let json = realistic_archive()
        .with_raw(json!(null))
        .with_raw(json!({"title": "no id", "mapping": {}}))
        .with_raw(json!({"id": "no-mapping"}))
        .with_raw(json!({
            "id": "no-author",
            "mapping": {
                "n1": {"message": {"content": {"content_type": "text", "parts": ["Who wrote this?"]}}}
            }
        }))
        .with_conversation(
            ConversationBuilder::new("odd-role")
                .node(NodeBuilder::message("n1", "narrator", "Once upon a time").children(&["n2"]))
                .node(NodeBuilder::message("n2", "user", "Go on").parent("n1")),
        )
        .to_json_string();

    let outcome = parse_archive(&json, "conversations.json");
    let archive = outcome.archive.expect("bad records must not abort the parse");
    assert_eq!(archive.total_conversations, 4);

    // Messages with an unrecognized role are dropped on their own
    let odd = archive.conversation("odd-role").unwrap();
    assert_eq!(odd.messages.len(), 1);
    assert_eq!(odd.messages[0].content, "Go on");

    let kinds: Vec<ParseErrorKind> = outcome.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            ParseErrorKind::ProcessingFailure,
            ParseErrorKind::MissingField,
            ParseErrorKind::MissingField,
            ParseErrorKind::ProcessingFailure,
        ]
    );
    assert_eq!(outcome.errors[2].conversation_id.as_deref(), Some("no-mapping"));
    assert_eq!(outcome.errors[3].conversation_id.as_deref(), Some("no-author"));
    assert!(outcome.errors[3].message.contains("no author"));
}

#[test]
fn test_e2e_parse_file_sets_path() {
    let (_dir, path) = realistic_archive().write_to_temp();

    let outcome = parse_archive_file(&path, &ParseOptions::default()).unwrap();
    let archive = outcome.archive.unwrap();
    assert_eq!(archive.source.name, "conversations.json");
    assert_eq!(archive.source.path.as_deref(), Some(path.as_path()));
}

#[test]
fn test_e2e_sequential_and_parallel_agree() {
    let mut builder = ArchiveBuilder::new();
    for i in 0..50 {
        let mut conversation = ConversationBuilder::new(&format!("c{}", i))
            .title(&format!("Topic {}", i))
            .thread(&[("user", "question"), ("assistant", "answer")]);
        if i % 3 == 0 {
            conversation = conversation.project("g-p-shared");
        }
        builder = builder.with_conversation(conversation);
        if i % 7 == 0 {
            builder = builder.with_raw(json!({"id": format!("broken-{}", i)}));
        }
    }
    let json = builder.to_json_string();

    let parallel =
        parse_archive_with_options(&json, "a.json", &ParseOptions::default().with_chunk_size(4));
    let sequential =
        parse_archive_with_options(&json, "a.json", &ParseOptions::sequential().with_chunk_size(9));

    assert_eq!(parallel.archive, sequential.archive);
    assert_eq!(parallel.errors, sequential.errors);
    assert_eq!(parallel.errors.len(), 8);
}

#[test]
fn test_e2e_stats() {
    let archive =
        parse_archive(&realistic_archive().to_json_string(), "conversations.json").archive.unwrap();
    let stats = ArchiveStats::from_archive(&archive);

    assert_eq!(stats.total_conversations, 3);
    assert_eq!(stats.total_messages, 5);
    assert_eq!(stats.messages_by_role.get(&Role::User), Some(&3));
    assert_eq!(stats.messages_by_role.get(&Role::Assistant), Some(&2));
    assert_eq!(stats.model_usage.get("unknown"), Some(&1));
    assert_eq!(stats.archived_conversations, 1);
    assert_eq!(stats.starred_conversations, 1);
    assert_eq!(stats.standalone_conversations, 1);
    assert_eq!(stats.conversations_by_month.len(), 3);
}
