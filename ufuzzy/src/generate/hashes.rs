// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Hash functions driving the generator.

pub(crate) mod block_hash;
pub(crate) mod rolling_hash;
