// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod debounce;
pub mod distinct;
pub mod element_at;
pub mod filter;
pub mod first;
pub mod ignore_elements;
pub mod last;
pub mod map;
pub mod on_error;
pub mod sample;
pub mod skip;
pub mod skip_last;
pub mod take;
pub mod take_last;

pub use debounce::DebounceExt;
pub use distinct::DistinctExt;
pub use element_at::ElementAtExt;
pub use filter::FilterExt;
pub use first::FirstExt;
pub use ignore_elements::IgnoreElementsExt;
pub use last::LastExt;
pub use map::MapExt;
pub use on_error::OnErrorExt;
pub use sample::SampleExt;
pub use skip::SkipExt;
pub use skip_last::SkipLastExt;
pub use take::TakeExt;
pub use take_last::TakeLastExt;
