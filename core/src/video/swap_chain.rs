//! Multi-buffered swap chain.
//!
//! Surfaces move between four places: the free list, the caller (one leased
//! [`Frame`] at a time), the present queue, and the front buffer being shown.
//! Acquiring moves a surface out of the free list; presenting moves it into
//! the queue; a flip at the next vertical interval promotes the oldest queued
//! surface to the front and returns the old front to the free list.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::error;

use super::framebuffer::Framebuffer;
use crate::error::StartupError;

/// Fewest surfaces a swap chain can run with: one shown, one drawn.
pub const MIN_SURFACES: usize = 2;

static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(1);

/// The display side of a swap chain.
pub trait Scanout {
    /// Block the calling thread until the next vertical interval. This is the
    /// only point where [`FrameSource::acquire`] suspends.
    fn wait_vblank(&mut self);

    /// Make `surface` the visible image.
    fn scan_out(&mut self, surface: &Framebuffer);
}

/// Hands out writable back buffers and takes them back for display.
pub trait FrameSource {
    /// Block until a back buffer is free and lease it to the caller.
    fn acquire(&mut self) -> Frame;

    /// Queue `frame` for the next vertical interval.
    ///
    /// The frame is taken by value, so the caller's handle is gone once it
    /// has been presented:
    ///
    /// ```compile_fail
    /// use realms_core::video::{Color, FrameSource, SwapChain};
    /// # struct Null;
    /// # impl realms_core::video::Scanout for Null {
    /// #     fn wait_vblank(&mut self) {}
    /// #     fn scan_out(&mut self, _: &realms_core::video::Framebuffer) {}
    /// # }
    /// let mut chain = SwapChain::new(Null, 2).unwrap();
    /// let mut frame = chain.acquire();
    /// chain.present(frame);
    /// frame.fill(Color::RED); // use after present: rejected
    /// ```
    fn present(&mut self, frame: Frame);

    /// Display every queued frame. Called once on shutdown.
    fn flush(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Lease {
    chain: u64,
    serial: u64,
}

/// Exclusive write access to one back buffer, from acquire until present.
pub struct Frame {
    slot: usize,
    surface: Framebuffer,
    lease: Lease,
}

impl Frame {
    /// Which backing surface this is (stable across recycling).
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Acquire count at the time this frame was leased, starting at 0.
    pub fn serial(&self) -> u64 {
        self.lease.serial
    }
}

impl Deref for Frame {
    type Target = Framebuffer;

    fn deref(&self) -> &Framebuffer {
        &self.surface
    }
}

impl DerefMut for Frame {
    fn deref_mut(&mut self) -> &mut Framebuffer {
        &mut self.surface
    }
}

/// A [`FrameSource`] over a fixed set of surfaces and a [`Scanout`].
pub struct SwapChain<S: Scanout> {
    id: u64,
    scanout: S,
    surfaces: usize,
    free: VecDeque<(usize, Framebuffer)>,
    queued: VecDeque<(usize, Framebuffer)>,
    front: Option<(usize, Framebuffer)>,
    leased: Option<Lease>,
    next_serial: u64,
}

impl<S: Scanout> SwapChain<S> {
    /// Allocate `surfaces` framebuffers. At least [`MIN_SURFACES`] are needed.
    pub fn new(scanout: S, surfaces: usize) -> Result<Self, StartupError> {
        if surfaces < MIN_SURFACES {
            return Err(StartupError::InsufficientSurfaces {
                requested: surfaces,
                minimum: MIN_SURFACES,
            });
        }
        Ok(Self {
            id: NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed),
            scanout,
            surfaces,
            free: (0..surfaces).map(|slot| (slot, Framebuffer::new())).collect(),
            queued: VecDeque::new(),
            front: None,
            leased: None,
            next_serial: 0,
        })
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces
    }

    /// The surface currently shown, if any frame has been flipped yet.
    pub fn front(&self) -> Option<&Framebuffer> {
        self.front.as_ref().map(|(_, fb)| fb)
    }

    /// Presented frames still waiting for a vertical interval.
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn scanout(&self) -> &S {
        &self.scanout
    }

    pub fn scanout_mut(&mut self) -> &mut S {
        &mut self.scanout
    }

    /// Promote the oldest queued surface at the next vertical interval.
    /// Returns false if nothing was queued.
    fn flip(&mut self) -> bool {
        let Some(next) = self.queued.pop_front() else {
            return false;
        };
        self.scanout.wait_vblank();
        self.scanout.scan_out(&next.1);
        if let Some(old) = self.front.replace(next) {
            self.free.push_back(old);
        }
        true
    }
}

impl<S: Scanout> FrameSource for SwapChain<S> {
    fn acquire(&mut self) -> Frame {
        assert!(
            self.leased.is_none(),
            "frame acquired while the previous frame is still leased"
        );
        let (slot, surface) = loop {
            if let Some(entry) = self.free.pop_front() {
                break entry;
            }
            // Nothing free and nothing leased: at least one surface must be
            // queued, since the front holds only one.
            if !self.flip() {
                panic!("swap chain has no surface to recycle");
            }
        };
        let lease = Lease {
            chain: self.id,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        self.leased = Some(lease);
        Frame {
            slot,
            surface,
            lease,
        }
    }

    fn present(&mut self, frame: Frame) {
        debug_assert_eq!(
            self.leased,
            Some(frame.lease),
            "presented a frame this swap chain did not lease"
        );
        if self.leased != Some(frame.lease) {
            error!(
                serial = frame.lease.serial,
                "dropping frame presented to the wrong swap chain"
            );
            return;
        }
        self.leased = None;
        self.queued.push_back((frame.slot, frame.surface));
    }

    fn flush(&mut self) {
        while self.flip() {}
    }
}
