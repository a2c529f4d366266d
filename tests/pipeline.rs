use std::sync::Arc;
use std::thread;

use astview::config::STARTER_TEXT;
use astview::{parse, PipelineController, TreeFormatter};

#[test]
fn test_starts_with_starter_rendering() {
    let controller = PipelineController::new();
    assert_eq!(&*controller.current_text(), STARTER_TEXT);
    assert_eq!(
        controller.current_rendered(),
        TreeFormatter::default().render(&parse(STARTER_TEXT))
    );
}

#[test]
fn test_valid_to_invalid_flips_on_next_edit() {
    let controller = PipelineController::new();
    assert!(controller.on_text_changed("package main\nfunc main() {}"));
    assert!(controller.current_rendered().starts_with("File\n"));

    assert!(controller.on_text_changed("package main\nfunc main() {"));
    assert_eq!(
        controller.current_rendered().as_str(),
        "main.go:2:14: expected '}', found 'EOF'"
    );

    assert!(controller.on_text_changed("package main\nfunc main() {}"));
    assert!(controller.current_rendered().starts_with("File\n"));
}

#[test]
fn test_identical_resubmission() {
    let controller = PipelineController::new();
    let text = "package main\nvar x = f(1, 2)";
    controller.on_text_changed(text);
    let first = controller.current_rendered();
    controller.on_text_changed(text);
    let second = controller.current_rendered();
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(controller.current_state().generation, 2);
}

#[test]
fn test_rendering_survives_newer_state() {
    let controller = PipelineController::new();
    controller.on_text_changed("package a");
    let held = controller.current_rendered();
    controller.on_text_changed("package b");
    assert_eq!(held.as_str(), "File\n  Name: Ident: a\n");
    assert_eq!(controller.current_rendered().as_str(), "File\n  Name: Ident: b\n");
}

#[test]
fn test_concurrent_edits_keep_newest() {
    let controller = Arc::new(PipelineController::new());
    let tickets: Vec<u64> = (0..8).map(|_| controller.next_ticket()).collect();
    let newest = *tickets.last().expect("tickets");

    let handles: Vec<_> = tickets
        .into_iter()
        .map(|ticket| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                controller.complete(ticket, &format!("package p{}", ticket));
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("edit thread");
    }

    let state = controller.current_state();
    assert_eq!(state.generation, newest);
    assert_eq!(&*state.text, format!("package p{}", newest));
    assert_eq!(
        state.rendered.as_str(),
        format!("File\n  Name: Ident: p{}\n", newest)
    );
}
