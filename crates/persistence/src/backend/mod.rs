// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations, PRAGMAs and `last_insert_rowid()` live
//! here. Everything else is written in Diesel DSL.

pub mod sqlite;
