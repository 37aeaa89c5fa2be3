use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Muted clinical palette: teal headings on a neutral foreground.
pub struct Ward;

impl Ward {
    pub fn skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Ward::FG);
        skin.bold.set_fg(Ward::FG);
        skin.italic.set_fg(Ward::MUTED);

        skin.headers[0].set_fg(Ward::TEAL);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(Ward::SKY);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.table.set_fg(Ward::MUTED);
        skin.bullet.set_fg(Ward::TEAL);
        skin.inline_code.set_fg(Ward::AMBER);

        skin
    }

    pub const FG: Color = Color::Rgb {
        r: 0xD8,
        g: 0xDE,
        b: 0xE9,
    }; // #D8DEE9
    pub const MUTED: Color = Color::Rgb {
        r: 0x7B,
        g: 0x88,
        b: 0xA1,
    }; // #7B88A1
    pub const TEAL: Color = Color::Rgb {
        r: 0x4F,
        g: 0xB3,
        b: 0xA9,
    }; // #4FB3A9
    pub const SKY: Color = Color::Rgb {
        r: 0x81,
        g: 0xA1,
        b: 0xC1,
    }; // #81A1C1
    pub const AMBER: Color = Color::Rgb {
        r: 0xEB,
        g: 0xCB,
        b: 0x8B,
    }; // #EBCB8B
    pub const GREEN: Color = Color::Rgb {
        r: 0xA3,
        g: 0xBE,
        b: 0x8C,
    }; // #A3BE8C
    pub const RED: Color = Color::Rgb {
        r: 0xBF,
        g: 0x61,
        b: 0x6A,
    }; // #BF616A
}
