mod common;

use common::RecordingScanout;
use realms_core::error::StartupError;
use realms_core::video::{Color, FrameSource, SwapChain};

#[test]
fn test_needs_two_surfaces() {
    for n in 0..2 {
        assert!(matches!(
            SwapChain::new(RecordingScanout::default(), n),
            Err(StartupError::InsufficientSurfaces { minimum: 2, .. })
        ));
    }
    assert!(SwapChain::new(RecordingScanout::default(), 2).is_ok());
}

#[test]
fn test_double_buffer_alternates_slots() {
    let mut chain = SwapChain::new(RecordingScanout::default(), 2).unwrap();
    let mut slots = Vec::new();
    for _ in 0..6 {
        let frame = chain.acquire();
        slots.push(frame.slot());
        chain.present(frame);
    }
    // The first two frames fill both surfaces; after that the swap chain
    // alternates between them.
    assert_eq!(slots, [0, 1, 0, 1, 0, 1]);
}

#[test]
fn test_never_draws_into_front_buffer() {
    let mut chain = SwapChain::new(RecordingScanout::default(), 2).unwrap();
    let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];
    for &color in &colors {
        let mut frame = chain.acquire();
        // The surface being drawn is never the one on screen
        if let Some(front) = chain.front() {
            assert_ne!(front.pixels().as_ptr(), frame.pixels().as_ptr());
        }
        frame.fill(color);
        chain.present(frame);
    }
    chain.flush();
    assert_eq!(chain.scanout().shown, colors);
}

#[test]
fn test_one_vblank_per_flip() {
    let mut chain = SwapChain::new(RecordingScanout::default(), 2).unwrap();
    for _ in 0..10 {
        let frame = chain.acquire();
        chain.present(frame);
    }
    chain.flush();
    assert_eq!(chain.scanout().vblanks, 10);
    assert_eq!(chain.scanout().shown.len(), 10);
}

#[test]
fn test_triple_buffer_uses_all_slots() {
    let mut chain = SwapChain::new(RecordingScanout::default(), 3).unwrap();
    let mut seen = [false; 3];
    for _ in 0..9 {
        let frame = chain.acquire();
        seen[frame.slot()] = true;
        chain.present(frame);
    }
    assert_eq!(seen, [true; 3]);
    assert_eq!(chain.surface_count(), 3);
}

#[test]
fn test_surfaces_keep_contents_between_uses() {
    let mut chain = SwapChain::new(RecordingScanout::default(), 2).unwrap();
    let mut first = chain.acquire();
    first.fill(Color::RED);
    let first_slot = first.slot();
    chain.present(first);

    let second = chain.acquire();
    chain.present(second);

    // Same surface comes back with its old contents; the loop must repaint it
    let third = chain.acquire();
    assert_eq!(third.slot(), first_slot);
    assert_eq!(third.pixel(0, 0), Some(Color::RED));
    chain.present(third);
}
