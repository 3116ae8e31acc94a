use super::Theme;
use crossterm::style::Color;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Plain 16-color palette, the only one that works on every terminal.
pub const DEFAULT: Theme = Theme {
    name: "default",
    display_name: "Default",
    title: Color::Cyan,
    border: Color::DarkGrey,
    label: Color::White,
    value: Color::Grey,
    low: Color::Green,
    mid: Color::Yellow,
    high: Color::Red,
    accent: Color::Magenta,
    cpu: Color::Green,
    gpu: Color::Yellow,
    mem: Color::Blue,
    disk: Color::Magenta,
    net: Color::Cyan,
    process: Color::White,
    selected: Color::Cyan,
    graph_fill: Color::Cyan,
    graph_empty: Color::DarkGrey,
    header: Color::Cyan,
    footer: Color::DarkGrey,
};

pub const DRACULA: Theme = Theme {
    name: "dracula",
    display_name: "Dracula",
    title: rgb(189, 147, 249),
    border: rgb(68, 71, 90),
    label: rgb(248, 248, 242),
    value: rgb(248, 248, 242),
    low: rgb(80, 250, 123),
    mid: rgb(255, 184, 108),
    high: rgb(255, 85, 85),
    accent: rgb(255, 121, 198),
    cpu: rgb(80, 250, 123),
    gpu: rgb(241, 250, 140),
    mem: rgb(139, 233, 253),
    disk: rgb(255, 121, 198),
    net: rgb(139, 233, 253),
    process: rgb(248, 248, 242),
    selected: rgb(189, 147, 249),
    graph_fill: rgb(189, 147, 249),
    graph_empty: rgb(68, 71, 90),
    header: rgb(189, 147, 249),
    footer: rgb(98, 114, 164),
};

pub const NORD: Theme = Theme {
    name: "nord",
    display_name: "Nord",
    title: rgb(136, 192, 208),
    border: rgb(76, 86, 106),
    label: rgb(236, 239, 244),
    value: rgb(229, 233, 240),
    low: rgb(163, 190, 140),
    mid: rgb(235, 203, 139),
    high: rgb(191, 97, 106),
    accent: rgb(180, 142, 173),
    cpu: rgb(163, 190, 140),
    gpu: rgb(235, 203, 139),
    mem: rgb(129, 161, 193),
    disk: rgb(180, 142, 173),
    net: rgb(136, 192, 208),
    process: rgb(229, 233, 240),
    selected: rgb(136, 192, 208),
    graph_fill: rgb(136, 192, 208),
    graph_empty: rgb(76, 86, 106),
    header: rgb(136, 192, 208),
    footer: rgb(76, 86, 106),
};

pub const GRUVBOX: Theme = Theme {
    name: "gruvbox",
    display_name: "Gruvbox",
    title: rgb(254, 128, 25),
    border: rgb(102, 92, 84),
    label: rgb(235, 219, 178),
    value: rgb(213, 196, 161),
    low: rgb(184, 187, 38),
    mid: rgb(250, 189, 47),
    high: rgb(251, 73, 52),
    accent: rgb(211, 134, 155),
    cpu: rgb(184, 187, 38),
    gpu: rgb(250, 189, 47),
    mem: rgb(131, 165, 152),
    disk: rgb(211, 134, 155),
    net: rgb(254, 128, 25),
    process: rgb(235, 219, 178),
    selected: rgb(254, 128, 25),
    graph_fill: rgb(254, 128, 25),
    graph_empty: rgb(102, 92, 84),
    header: rgb(254, 128, 25),
    footer: rgb(146, 131, 116),
};

pub const MONOKAI: Theme = Theme {
    name: "monokai",
    display_name: "Monokai",
    title: rgb(102, 217, 239),
    border: rgb(117, 113, 94),
    label: rgb(248, 248, 242),
    value: rgb(248, 248, 242),
    low: rgb(166, 226, 46),
    mid: rgb(230, 219, 116),
    high: rgb(249, 38, 114),
    accent: rgb(174, 129, 255),
    cpu: rgb(166, 226, 46),
    gpu: rgb(230, 219, 116),
    mem: rgb(102, 217, 239),
    disk: rgb(174, 129, 255),
    net: rgb(102, 217, 239),
    process: rgb(248, 248, 242),
    selected: rgb(249, 38, 114),
    graph_fill: rgb(102, 217, 239),
    graph_empty: rgb(117, 113, 94),
    header: rgb(102, 217, 239),
    footer: rgb(117, 113, 94),
};

pub const SOLARIZED: Theme = Theme {
    name: "solarized",
    display_name: "Solarized",
    title: rgb(38, 139, 210),
    border: rgb(88, 110, 117),
    label: rgb(147, 161, 161),
    value: rgb(131, 148, 150),
    low: rgb(133, 153, 0),
    mid: rgb(181, 137, 0),
    high: rgb(220, 50, 47),
    accent: rgb(108, 113, 196),
    cpu: rgb(133, 153, 0),
    gpu: rgb(181, 137, 0),
    mem: rgb(42, 161, 152),
    disk: rgb(108, 113, 196),
    net: rgb(38, 139, 210),
    process: rgb(147, 161, 161),
    selected: rgb(38, 139, 210),
    graph_fill: rgb(38, 139, 210),
    graph_empty: rgb(88, 110, 117),
    header: rgb(38, 139, 210),
    footer: rgb(88, 110, 117),
};

pub const TOKYO: Theme = Theme {
    name: "tokyo",
    display_name: "Tokyo Night",
    title: rgb(122, 162, 247),
    border: rgb(65, 72, 104),
    label: rgb(192, 202, 245),
    value: rgb(169, 177, 214),
    low: rgb(158, 206, 106),
    mid: rgb(224, 175, 104),
    high: rgb(247, 118, 142),
    accent: rgb(187, 154, 247),
    cpu: rgb(158, 206, 106),
    gpu: rgb(224, 175, 104),
    mem: rgb(125, 207, 255),
    disk: rgb(187, 154, 247),
    net: rgb(122, 162, 247),
    process: rgb(192, 202, 245),
    selected: rgb(255, 158, 100),
    graph_fill: rgb(122, 162, 247),
    graph_empty: rgb(65, 72, 104),
    header: rgb(122, 162, 247),
    footer: rgb(86, 95, 137),
};

pub const CATPPUCCIN: Theme = Theme {
    name: "catppuccin",
    display_name: "Catppuccin",
    title: rgb(137, 180, 250),
    border: rgb(108, 112, 134),
    label: rgb(205, 214, 244),
    value: rgb(186, 194, 222),
    low: rgb(166, 227, 161),
    mid: rgb(249, 226, 175),
    high: rgb(243, 139, 168),
    accent: rgb(203, 166, 247),
    cpu: rgb(166, 227, 161),
    gpu: rgb(249, 226, 175),
    mem: rgb(148, 226, 213),
    disk: rgb(203, 166, 247),
    net: rgb(137, 180, 250),
    process: rgb(205, 214, 244),
    selected: rgb(245, 194, 231),
    graph_fill: rgb(137, 180, 250),
    graph_empty: rgb(108, 112, 134),
    header: rgb(137, 180, 250),
    footer: rgb(127, 132, 156),
};

pub const ALL: [Theme; 8] = [
    DEFAULT, DRACULA, NORD, GRUVBOX, MONOKAI, SOLARIZED, TOKYO, CATPPUCCIN,
];
