/*
 * Two ways to hand a bag of conversion helpers to a type:
 * - mix them in: a trait with provided methods, the helpers read like
 *   native methods of the document
 * - delegate: a plain utility module called explicitly at every use site
 * Same arithmetic, different coupling.
 */

pub trait SizeConversions {
    fn size_bytes(&self) -> u64;

    fn bytes_to_kb(size_bytes: u64) -> f64 {
        size_bytes as f64 / 1024.0
    }

    fn bytes_to_mb(size_bytes: u64) -> f64 {
        size_bytes as f64 / (1024.0 * 1024.0)
    }

    fn kb_to_bytes(size_kb: f64) -> u64 {
        (size_kb * 1024.0) as u64
    }

    fn mb_to_bytes(size_mb: f64) -> u64 {
        (size_mb * 1024.0 * 1024.0) as u64
    }

    // instance methods on top of the associated helpers
    fn size_in_kb(&self) -> f64 {
        Self::bytes_to_kb(self.size_bytes())
    }

    fn size_in_mb(&self) -> f64 {
        Self::bytes_to_mb(self.size_bytes())
    }
}

pub struct PdfDocument {
    pub name: String,
    pub size_bytes: u64,
    pub page_count: u32,
}

impl PdfDocument {
    pub fn new(name: &str, size_bytes: u64, page_count: u32) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            page_count,
        }
    }

    pub fn info(&self) -> String {
        format!(
            "Document: {}, Size: {} bytes, Pages: {}, Size: {:.2} MB",
            self.name,
            self.size_bytes,
            self.page_count,
            self.size_in_mb()
        )
    }
}

impl SizeConversions for PdfDocument {
    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

pub struct WordDocument {
    pub name: String,
    pub size_bytes: u64,
    pub word_count: u32,
}

impl WordDocument {
    pub fn new(name: &str, size_bytes: u64, word_count: u32) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            word_count,
        }
    }

    pub fn info(&self) -> String {
        format!(
            "Document: {}, Size: {} bytes, Words: {}, Size: {:.2} KB",
            self.name,
            self.size_bytes,
            self.word_count,
            self.size_in_kb()
        )
    }
}

impl SizeConversions for WordDocument {
    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

// the delegation flavour: free functions, no trait, no inheritance,
// usable from any hierarchy (or none)
pub mod convert {
    pub fn bytes_to_kb(size_bytes: u64) -> f64 {
        size_bytes as f64 / 1024.0
    }

    pub fn bytes_to_mb(size_bytes: u64) -> f64 {
        size_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn kb_to_bytes(size_kb: f64) -> u64 {
        (size_kb * 1024.0) as u64
    }

    pub fn mb_to_bytes(size_mb: f64) -> u64 {
        (size_mb * 1024.0 * 1024.0) as u64
    }

    // picks the unit to match the magnitude
    pub fn format_size(size_bytes: u64) -> String {
        if size_bytes < 1024 {
            format!("{size_bytes} bytes")
        } else if size_bytes < 1024 * 1024 {
            format!("{:.2} KB", bytes_to_kb(size_bytes))
        } else {
            format!("{:.2} MB", bytes_to_mb(size_bytes))
        }
    }
}

pub fn run() {
    println!("=== MIXIN APPROACH ===");
    let pdf = PdfDocument::new("report.pdf", 2_500_000, 25);
    let word = WordDocument::new("letter.docx", 45_000, 500);
    println!("PDF: {}", pdf.info());
    println!("Word: {}", word.info());
    println!("PDF size in KB: {:.2}", pdf.size_in_kb());
    println!("Word size in MB: {:.4}", word.size_in_mb());

    println!("=== UTILITY MODULE APPROACH ===");
    // same documents, every conversion spelled out at the call site
    println!(
        "PDF size in KB: {:.2}",
        convert::bytes_to_kb(pdf.size_bytes)
    );
    println!(
        "Word size in MB: {:.4}",
        convert::bytes_to_mb(word.size_bytes)
    );
    println!("PDF: {}", convert::format_size(pdf.size_bytes));
    println!("Word: {}", convert::format_size(word.size_bytes));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_associated_conversions() {
        assert_eq!(1.0, <PdfDocument as SizeConversions>::bytes_to_mb(1_048_576));
        assert_eq!(10_240, <PdfDocument as SizeConversions>::kb_to_bytes(10.0));
        assert_eq!(
            2_097_152,
            <PdfDocument as SizeConversions>::mb_to_bytes(2.0)
        );
    }

    #[test]
    fn test_mixed_in_instance_methods() {
        let pdf = PdfDocument::new("file.pdf", 2_097_152, 10);
        assert!((pdf.size_in_mb() - 2.0).abs() < 0.01);
        assert!((pdf.size_in_kb() - 2048.0).abs() < 0.01);

        let word = WordDocument::new("file.docx", 10_240, 1000);
        assert!((word.size_in_mb() - 0.0098).abs() < 0.001);
        assert!((word.size_in_kb() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_utility_module() {
        assert_eq!(1.0, convert::bytes_to_mb(1_048_576));
        assert_eq!(10_240, convert::kb_to_bytes(10.0));
        // no inheritance and no special fields needed
        assert_eq!(2.0, convert::bytes_to_mb(2_097_152));
    }

    #[test]
    fn test_format_size_picks_the_unit() {
        assert_eq!("500 bytes", convert::format_size(500));
        assert_eq!("1.00 KB", convert::format_size(1024));
        assert_eq!("43.95 KB", convert::format_size(45_000));
        assert_eq!("2.38 MB", convert::format_size(2_500_000));
    }
}
