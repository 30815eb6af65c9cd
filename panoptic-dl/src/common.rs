pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use futures::{
    future,
    stream::{self, Stream, StreamExt as _, TryStreamExt as _},
};
pub use image::{
    imageops::{self, FilterType},
    DynamicImage, ImageBuffer, Luma, Rgb32FImage,
};
pub use itertools::Itertools as _;
pub use log::{info, warn};
pub use ndarray::{s, Array1, Array2, Array3, Array4, Axis};
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use par_stream::prelude::*;
pub use rand::prelude::*;
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    fmt::Debug,
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    pin::Pin,
    sync::Arc,
};

pub use bbox::{prelude::*, Transform, HW, TLBR};
pub use label::Label;

unzip_n::unzip_n!(pub 3);
unzip_n::unzip_n!(pub 6);
