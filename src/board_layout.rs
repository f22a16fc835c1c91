// Copyright (C) 2020-2024 Andy Kurnia.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

static TWS: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
static DWS: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
static TLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
static DLS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
static FVS: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

pub struct StaticBoardLayout<'a> {
    premiums: &'a [Premium],
    dim: i8,
    // 1-based, x is the column.
    star_x: i8,
    star_y: i8,
}

pub enum BoardLayout<'a> {
    Static(StaticBoardLayout<'a>),
}

impl BoardLayout<'_> {
    #[inline(always)]
    pub fn dim(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn star_x(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_x,
        }
    }

    #[inline(always)]
    pub fn star_y(&self) -> i8 {
        match self {
            BoardLayout::Static(x) => x.star_y,
        }
    }

    // row-major index, as produced by board::Coord::index.
    #[inline(always)]
    pub fn premium_at(&self, idx: usize) -> Premium {
        match self {
            BoardLayout::Static(x) => x.premiums[idx],
        }
    }
}

pub static CLASSIC_BOARD_LAYOUT: BoardLayout = BoardLayout::Static(StaticBoardLayout {
    premiums: &[
        TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
        FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
        FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
        DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
        FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
        FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
        FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
        TWS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
        FVS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DLS, FVS, FVS, //
        FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, //
        FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, FVS, DWS, FVS, FVS, FVS, FVS, //
        DLS, FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, DLS, //
        FVS, FVS, DWS, FVS, FVS, FVS, DLS, FVS, DLS, FVS, FVS, FVS, DWS, FVS, FVS, //
        FVS, DWS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, TLS, FVS, FVS, FVS, DWS, FVS, //
        TWS, FVS, FVS, DLS, FVS, FVS, FVS, TWS, FVS, FVS, FVS, DLS, FVS, FVS, TWS, //
    ],
    dim: 15,
    star_x: 8,
    star_y: 8,
});
