use std::io;

quick_error! {
    /// the ways decoding an instruction stream can fail
    #[derive(Debug)]
    pub enum DecodeError {
        /// the stream ended in the middle of an instruction. `offset` is where the
        /// instruction started, `cursor` is the last good position in the stream
        Truncated { offset: usize, cursor: usize } {
            display("truncated instruction at offset 0x{:04X}, stream ended at 0x{:04X}", offset, cursor)
        }
        /// immediate group operation (the ModRM reg field) outside the supported set
        UnsupportedOperation { offset: usize, reg: u8 } {
            display("unsupported immediate group operation {} at offset 0x{:04X}", reg, offset)
        }
        Io(err: io::Error) {
            from()
            display("I/O error: {}", err)
            cause(err)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ConfigError {
        Io(err: io::Error) {
            from()
            display("failed to read config: {}", err)
            cause(err)
        }
        Parse(err: toml::de::Error) {
            from()
            display("invalid config: {}", err)
            cause(err)
        }
    }
}
