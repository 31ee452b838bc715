// src/display/drivers/x11.rs
//! X11 display driver.
//!
//! One window, one GC, and an `XPutImage` blit per frame. The CPU back
//! buffer is the only buffering; the X server receives finished frames and
//! nothing else. Pixels are `0xAARRGGBB` words, which on a little-endian
//! machine is exactly the byte order a 32-bit ZPixmap image over a standard
//! TrueColor visual expects.

use crate::display::driver::DisplayDriver;
use crate::display::messages::{DisplayEvent, DriverConfig};
use crate::framebuffer::Framebuffer;
use crate::keys::{KeySymbol, Modifiers};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace};
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;
use x11::{keysym, xlib};

/// Buffer size for text obtained from `XLookupString`.
const KEY_TEXT_BUFFER_SIZE: usize = 32;

pub struct X11DisplayDriver {
    display: *mut xlib::Display,
    screen: c_int,
    window: xlib::Window,
    gc: xlib::GC,
    wm_delete_window: xlib::Atom,
    width_px: u32,
    height_px: u32,
}

impl DisplayDriver for X11DisplayDriver {
    fn open(config: &DriverConfig) -> Result<Self> {
        let c_title = CString::new(config.title.as_str())
            .context("window title contains an interior NUL byte")?;

        info!("X11DisplayDriver: opening display connection");
        unsafe {
            let display = xlib::XOpenDisplay(ptr::null());
            if display.is_null() {
                return Err(anyhow!("failed to open X11 display; is DISPLAY set?"));
            }

            let screen = xlib::XDefaultScreen(display);
            let root = xlib::XRootWindow(display, screen);
            let black = xlib::XBlackPixel(display, screen);

            let window = xlib::XCreateSimpleWindow(
                display,
                root,
                0,
                0,
                config.width_px,
                config.height_px,
                0,
                black,
                black,
            );
            if window == 0 {
                xlib::XCloseDisplay(display);
                return Err(anyhow!("failed to create X11 window"));
            }

            xlib::XStoreName(display, window, c_title.as_ptr());

            xlib::XSelectInput(
                display,
                window,
                xlib::ExposureMask | xlib::KeyPressMask | xlib::StructureNotifyMask,
            );

            // Ask the window manager to deliver close requests as
            // ClientMessage events instead of killing the connection.
            let wm_delete_window = xlib::XInternAtom(
                display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            xlib::XSetWMProtocols(display, window, &wm_delete_window as *const _ as *mut _, 1);

            let gc = xlib::XCreateGC(display, window, 0, ptr::null_mut());

            xlib::XMapWindow(display, window);
            xlib::XFlush(display);

            info!(
                "X11DisplayDriver: created window {}x{}",
                config.width_px, config.height_px
            );

            Ok(Self {
                display,
                screen,
                window,
                gc,
                wm_delete_window,
                width_px: config.width_px,
                height_px: config.height_px,
            })
        }
    }

    fn poll_events(&mut self) -> Result<Vec<DisplayEvent>> {
        let mut events = Vec::new();

        // SAFETY: `self.display` is a live connection for the whole lifetime
        // of the driver; `XPending`/`XNextEvent` are the standard non-blocking
        // drain (`XNextEvent` cannot block while `XPending` reports a queue).
        while unsafe { xlib::XPending(self.display) } > 0 {
            let mut xevent: xlib::XEvent = unsafe { mem::zeroed() };
            unsafe { xlib::XNextEvent(self.display, &mut xevent) };

            if let Some(event) = self.translate_event(&mut xevent) {
                events.push(event);
            }
        }

        Ok(events)
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        trace!(
            "X11DisplayDriver: presenting {}x{} frame",
            frame.width(),
            frame.height()
        );

        unsafe {
            let depth = xlib::XDefaultDepth(self.display, self.screen);
            let visual = xlib::XDefaultVisual(self.display, self.screen);
            let data_ptr = frame.pixels().as_ptr() as *mut c_char;

            // bytes_per_line carries the frame's own pitch, so padded rows
            // blit correctly without an intermediate repack.
            let image = xlib::XCreateImage(
                self.display,
                visual,
                depth as c_uint,
                xlib::ZPixmap,
                0,
                data_ptr,
                frame.width(),
                frame.height(),
                32,
                frame.pitch() as c_int,
            );
            if image.is_null() {
                return Err(anyhow!("XCreateImage failed"));
            }

            xlib::XPutImage(
                self.display,
                self.window,
                self.gc,
                image,
                0,
                0,
                0,
                0,
                frame.width(),
                frame.height(),
            );

            // Detach the pixel data so XDestroyImage frees only the XImage
            // struct, not the Rust-owned buffer.
            (*image).data = ptr::null_mut();
            xlib::XDestroyImage(image);
            xlib::XFlush(self.display);
        }

        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        unsafe {
            if let Ok(c_title) = CString::new(title) {
                xlib::XStoreName(self.display, self.window, c_title.as_ptr());
                xlib::XFlush(self.display);
            }
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }
}

impl X11DisplayDriver {
    fn translate_event(&mut self, xevent: &mut xlib::XEvent) -> Option<DisplayEvent> {
        // SAFETY: union field access is guarded by the event type tag in
        // every arm below.
        let event_type = unsafe { xevent.type_ };

        match event_type {
            xlib::KeyPress => {
                let key_event = unsafe { &mut xevent.key };
                let mut x_keysym: xlib::KeySym = 0;
                let mut text_buffer = [0u8; KEY_TEXT_BUFFER_SIZE];

                // XLookupString both translates the key to text and reports
                // the KeySym; no XIM is involved.
                let count = unsafe {
                    xlib::XLookupString(
                        key_event,
                        text_buffer.as_mut_ptr() as *mut c_char,
                        text_buffer.len() as c_int,
                        &mut x_keysym,
                        ptr::null_mut(),
                    )
                };
                let text = if count > 0 {
                    String::from_utf8_lossy(&text_buffer[..count as usize]).to_string()
                } else {
                    String::new()
                };

                let modifiers = extract_modifiers(key_event.state);
                let symbol = keysym_to_symbol(x_keysym, &text);
                debug!(
                    "XEvent: KeyPress (symbol: {:?}, keysym: 0x{:X}, modifiers: {:?})",
                    symbol, x_keysym, modifiers
                );
                Some(DisplayEvent::Key { symbol, modifiers })
            }
            xlib::ConfigureNotify => {
                let configure_event = unsafe { xevent.configure };
                let (w, h) = (configure_event.width as u32, configure_event.height as u32);
                if w != self.width_px || h != self.height_px {
                    debug!(
                        "XEvent: ConfigureNotify (resize from {}x{} to {}x{})",
                        self.width_px, self.height_px, w, h
                    );
                    self.width_px = w;
                    self.height_px = h;
                    Some(DisplayEvent::Resize {
                        width_px: w,
                        height_px: h,
                    })
                } else {
                    trace!("XEvent: ConfigureNotify (no size change)");
                    None
                }
            }
            xlib::Expose => {
                let expose_event = unsafe { xevent.expose };
                // Only the last Expose in a series matters; the frame loop
                // repaints in full regardless.
                if expose_event.count == 0 {
                    Some(DisplayEvent::Expose)
                } else {
                    None
                }
            }
            xlib::ClientMessage => {
                let client_message_event = unsafe { xevent.client_message };
                if client_message_event.data.as_longs()[0] as xlib::Atom == self.wm_delete_window {
                    info!("XEvent: WM_DELETE_WINDOW received from window manager");
                    Some(DisplayEvent::CloseRequested)
                } else {
                    trace!(
                        "XEvent: ignored ClientMessage (type: {})",
                        client_message_event.message_type
                    );
                    None
                }
            }
            _ => {
                trace!("XEvent: ignored (type: {})", event_type);
                None
            }
        }
    }
}

impl Drop for X11DisplayDriver {
    fn drop(&mut self) {
        unsafe {
            xlib::XFreeGC(self.display, self.gc);
            xlib::XDestroyWindow(self.display, self.window);
            xlib::XCloseDisplay(self.display);
        }
        info!("X11DisplayDriver dropped - resources cleaned up");
    }
}

/// Translates an X11 KeySym (plus the text `XLookupString` produced) into a
/// [`KeySymbol`].
///
/// Special keys are matched first: `XLookupString` translates several of
/// them (Escape, Return, BackSpace) into control bytes, and that text must
/// not shadow their symbolic meaning.
fn keysym_to_symbol(keysym_val: xlib::KeySym, text: &str) -> KeySymbol {
    // Standard keysyms fit in u32; anything larger has no mapping here.
    if keysym_val <= u32::MAX as xlib::KeySym {
        match keysym_val as u32 {
            keysym::XK_Return | keysym::XK_KP_Enter => return KeySymbol::Enter,
            keysym::XK_BackSpace => return KeySymbol::Backspace,
            keysym::XK_Tab | keysym::XK_KP_Tab | keysym::XK_ISO_Left_Tab => return KeySymbol::Tab,
            keysym::XK_Escape => return KeySymbol::Escape,
            keysym::XK_Left | keysym::XK_KP_Left => return KeySymbol::Left,
            keysym::XK_Up | keysym::XK_KP_Up => return KeySymbol::Up,
            keysym::XK_Right | keysym::XK_KP_Right => return KeySymbol::Right,
            keysym::XK_Down | keysym::XK_KP_Down => return KeySymbol::Down,
            _ => {}
        }
    }

    // Printable input arrives through XLookupString's translation.
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\u{FFFD}' && !c.is_control() => KeySymbol::Char(c),
        _ => {
            trace!(
                "Unhandled keysym 0x{:X} with text '{}', mapping to KeySymbol::Unknown",
                keysym_val,
                text
            );
            KeySymbol::Unknown
        }
    }
}

/// Reads the active modifier keys out of an X event's `state` field.
fn extract_modifiers(state: c_uint) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if (state & xlib::ShiftMask) != 0 {
        modifiers.insert(Modifiers::SHIFT);
    }
    if (state & xlib::ControlMask) != 0 {
        modifiers.insert(Modifiers::CONTROL);
    }
    if (state & xlib::Mod1Mask) != 0 {
        modifiers.insert(Modifiers::ALT);
    } // Mod1Mask is typically Alt.
    if (state & xlib::Mod4Mask) != 0 {
        modifiers.insert(Modifiers::SUPER);
    } // Mod4Mask is typically Super/Windows.
    modifiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_keysyms_beat_their_control_text() {
        // XLookupString yields "\x1b" for Escape and "\r" for Return; the
        // symbolic mapping must win.
        assert_eq!(
            keysym_to_symbol(keysym::XK_Escape as xlib::KeySym, "\u{1b}"),
            KeySymbol::Escape
        );
        assert_eq!(
            keysym_to_symbol(keysym::XK_Return as xlib::KeySym, "\r"),
            KeySymbol::Enter
        );
        assert_eq!(
            keysym_to_symbol(keysym::XK_BackSpace as xlib::KeySym, "\u{8}"),
            KeySymbol::Backspace
        );
    }

    #[test]
    fn test_navigation_keysyms_map() {
        assert_eq!(
            keysym_to_symbol(keysym::XK_Left as xlib::KeySym, ""),
            KeySymbol::Left
        );
        assert_eq!(
            keysym_to_symbol(keysym::XK_KP_Down as xlib::KeySym, ""),
            KeySymbol::Down
        );
    }

    #[test]
    fn test_printable_text_becomes_char() {
        assert_eq!(
            keysym_to_symbol(keysym::XK_a as xlib::KeySym, "a"),
            KeySymbol::Char('a')
        );
        assert_eq!(
            keysym_to_symbol(keysym::XK_space as xlib::KeySym, " "),
            KeySymbol::Char(' ')
        );
    }

    #[test]
    fn test_unmapped_keysym_is_unknown() {
        assert_eq!(
            keysym_to_symbol(keysym::XK_F1 as xlib::KeySym, ""),
            KeySymbol::Unknown
        );
        // Keysyms beyond the u32 range have no mapping at all.
        assert_eq!(
            keysym_to_symbol(xlib::KeySym::MAX, ""),
            KeySymbol::Unknown
        );
    }

    #[test]
    fn test_extract_modifiers_reads_state_masks() {
        assert_eq!(extract_modifiers(0), Modifiers::empty());
        assert_eq!(
            extract_modifiers(xlib::ShiftMask | xlib::ControlMask),
            Modifiers::SHIFT | Modifiers::CONTROL
        );
        assert_eq!(extract_modifiers(xlib::Mod1Mask), Modifiers::ALT);
        assert_eq!(extract_modifiers(xlib::Mod4Mask), Modifiers::SUPER);
    }
}
