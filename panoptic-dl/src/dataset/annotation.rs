use crate::common::*;

/// Columns per row of the on-disk box table:
/// `[instance_id, class, x1, y1, x2, y2, weight]`.
pub const BOX_TABLE_COLUMNS: usize = 7;

/// A parsed box annotation in normalized TLBR coordinates.
pub type BoxLabel = Label<TLBR<R64>, i32>;

/// Read and parse the box table of one example.
///
/// Coordinates normalize against the ORIGINAL (pre-resize) image size;
/// resizing later must not move an already-normalized box.
pub fn load_annotations(boxes_file: &Path, orig_size: &HW<usize>) -> Result<Vec<BoxLabel>> {
    let text = fs::read_to_string(boxes_file).with_context(|| {
        format!(
            "failed to read box annotation file '{}'",
            boxes_file.display()
        )
    })?;
    let labels = parse_box_table(&text, orig_size).with_context(|| {
        format!("malformed box annotation file '{}'", boxes_file.display())
    })?;

    // inconsistent source annotations may leave the unit range; they pass
    // through unclamped
    let out_of_range = labels.iter().any(|label| {
        let [t, l, b, r] = label.rect.tlbr();
        t < r64(0.0) || l < r64(0.0) || b > r64(1.0) || r > r64(1.0)
    });
    if out_of_range {
        warn!(
            "out-of-range normalized box in '{}'",
            boxes_file.display()
        );
    }

    Ok(labels)
}

/// Parse the whitespace/newline-delimited integer table.
///
/// The raw box corners come in `[x1, y1, x2, y2]` order and become TLBR as
/// `[t = y1, l = x1, b = y2, r = x2]`.
pub fn parse_box_table(text: &str, orig_size: &HW<usize>) -> Result<Vec<BoxLabel>> {
    let tokens: Vec<i32> = text
        .split('\n')
        .flat_map(|line| line.split(' '))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse()
                .with_context(|| format!("invalid integer token '{}'", token))
        })
        .try_collect()?;

    ensure!(
        tokens.len() % BOX_TABLE_COLUMNS == 0,
        "expected rows of {} integers, but found {} tokens",
        BOX_TABLE_COLUMNS,
        tokens.len()
    );

    let size = orig_size.clone().cast::<R64>();
    let to_unit = Transform::from_sizes_exact(&size, &HW::from_hw([r64(1.0), r64(1.0)]));

    tokens
        .chunks_exact(BOX_TABLE_COLUMNS)
        .map(|row| {
            let class = row[1];
            let [x1, y1, x2, y2] = [row[2], row[3], row[4], row[5]].map(|v| r64(f64::from(v)));
            let weight = r64(f64::from(row[6]));

            let rect = TLBR::try_from_tlbr([y1, x1, y2, x2])?;
            let label = Label {
                rect,
                class,
                weight,
            };
            Ok(&to_unit * &label)
        })
        .try_collect()
}
