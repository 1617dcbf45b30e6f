// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(missing_docs)]
//! minifb window, framebuffer, and keyboard handling

use chip8vm::{
    cpu::screen::{HEIGHT, WIDTH},
    Result, Screen, CPU,
};
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub name: &'static str,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(scale: Scale) -> Self {
        let mut builder = Self::default();
        builder.window_options.scale = scale;
        builder
    }
    pub fn build(&self) -> Result<UI> {
        Ok(UI {
            window: Window::new(self.name, WIDTH, HEIGHT, self.window_options)?,
            keyboard: vec![],
            fb: FrameBuffer::default(),
            time: Instant::now(),
        })
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            name: "chip8vm",
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

/// Foreground and background colors, as 0RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub fg: u32,
    pub bg: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            fg: 0x00e0c070,
            bg: 0x00181420,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    palette: Palette,
}

impl FrameBuffer {
    /// Converts the [Screen]'s pixels to colors
    pub fn update(&mut self, screen: &Screen) -> &[u32] {
        for (color, &pixel) in self.buffer.iter_mut().zip(screen.pixels()) {
            *color = match pixel {
                0 => self.palette.bg,
                _ => self.palette.fg,
            };
        }
        &self.buffer
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer {
            buffer: vec![0; WIDTH * HEIGHT],
            palette: Palette::default(),
        }
    }
}

/// What the host should do after handling input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    keyboard: Vec<Key>,
    fb: FrameBuffer,
    time: Instant,
}

impl UI {
    /// Presents the CPU's screen. Returns [Control::Quit] once the window closes.
    pub fn frame(&mut self, cpu: &CPU) -> Result<Control> {
        if !self.window.is_open() {
            return Ok(Control::Quit);
        }
        let title = if cpu.flags.halted {
            "chip8vm: halted".to_owned()
        } else if cpu.flags.pause {
            "chip8vm: paused".to_owned()
        } else {
            format!("chip8vm: {:.1} fps", 1.0 / self.time.elapsed().as_secs_f64())
        };
        self.window.set_title(&title);
        self.time = Instant::now();
        let buffer = self.fb.update(cpu.screen());
        self.window.update_with_buffer(buffer, WIDTH, HEIGHT)?;
        Ok(Control::Continue)
    }

    /// Forwards key edges to the CPU, and handles the host keybinds
    pub fn keys(&mut self, cpu: &mut CPU) -> Result<Control> {
        let held = self.window.get_keys();
        for &key in self.keyboard.iter().filter(|key| !held.contains(key)) {
            if let Some(key) = identify_key(key) {
                cpu.release(key)?;
            }
        }
        for &key in held.iter().filter(|key| !self.keyboard.contains(key)) {
            match key {
                Key::Escape => return Ok(Control::Quit),
                Key::P => {
                    cpu.flags.pause();
                    eprintln!("{}", if cpu.flags.pause { "Paused" } else { "Resumed" });
                }
                Key::N if cpu.flags.pause => {
                    cpu.singlestep()?;
                    cpu.dump();
                }
                Key::Backspace => {
                    eprintln!("Reset");
                    cpu.reset();
                }
                Key::F1 => cpu.dump(),
                Key::F2 => cpu.screen().print_screen(),
                key => {
                    if let Some(key) = identify_key(key) {
                        cpu.press(key)?;
                    }
                }
            }
        }
        self.keyboard = held;
        Ok(Control::Continue)
    }
}

/// Maps the left-hand 4x4 block of a QWERTY keyboard onto the hex keypad
/// ```text
/// 1 2 3 4      1 2 3 C
/// Q W E R  ->  4 5 6 D
/// A S D F      7 8 9 E
/// Z X C V      A 0 B F
/// ```
pub fn identify_key(key: Key) -> Option<usize> {
    Some(match key {
        Key::Key1 => 0x1,
        Key::Key2 => 0x2,
        Key::Key3 => 0x3,
        Key::Key4 => 0xc,
        Key::Q => 0x4,
        Key::W => 0x5,
        Key::E => 0x6,
        Key::R => 0xd,
        Key::A => 0x7,
        Key::S => 0x8,
        Key::D => 0x9,
        Key::F => 0xe,
        Key::Z => 0xa,
        Key::X => 0x0,
        Key::C => 0xb,
        Key::V => 0xf,
        _ => return None,
    })
}
