//! Catalogue of JDK namespaces and the public top-level types they export.

pub(crate) const CATALOGUE: &[(&str, &[&str])] = &[
    (
        "java.util.zip",
        &[
            "Adler32", "CheckedInputStream", "CheckedOutputStream", "CRC32", "Deflater",
            "DeflaterInputStream", "DeflaterOutputStream", "GZIPInputStream", "GZIPOutputStream",
            "Inflater", "InflaterInputStream", "InflaterOutputStream", "ZipEntry", "ZipFile",
            "ZipInputStream", "ZipOutputStream", "DataFormatException", "ZipException",
            "ZipError",
        ],
    ),
    (
        "java.util.spi",
        &[
            "CurrencyNameProvider", "LocaleNameProvider", "LocaleServiceProvider",
            "TimeZoneNameProvider",
        ],
    ),
    (
        "java.util.regex",
        &[
            "MatchResult", "Matcher", "Pattern", "PatternSyntaxException",
        ],
    ),
    (
        "java.util.prefs",
        &[
            "NodeChangeListener", "PreferenceChangeListener", "PreferencesFactory",
            "AbstractPreferences", "NodeChangeEvent", "PreferenceChangeEvent", "Preferences",
            "BackingStoreException", "InvalidPreferencesFormatException",
        ],
    ),
    (
        "java.util.logging",
        &[
            "Filter", "LoggingMXBean", "ConsoleHandler", "ErrorManager", "FileHandler",
            "Formatter", "Handler", "Level", "Logger", "LoggingPermission", "LogManager",
            "LogRecord", "MemoryHandler", "SimpleFormatter", "SocketHandler", "StreamHandler",
            "XMLFormatter",
        ],
    ),
    (
        "java.util.jar",
        &[
            "Attributes", "JarEntry", "JarFile", "JarInputStream", "JarOutputStream", "Manifest",
            "Pack200", "JarException",
        ],
    ),
    (
        "java.util.concurrent.locks",
        &[
            "Condition", "Lock", "ReadWriteLock", "AbstractOwnableSynchronizer",
            "AbstractQueuedLongSynchronizer", "AbstractQueuedSynchronizer", "LockSupport",
            "ReentrantLock", "ReentrantReadWriteLock",
        ],
    ),
    (
        "java.util.concurrent.atomic",
        &[
            "AtomicBoolean", "AtomicInteger", "AtomicIntegerArray", "AtomicIntegerFieldUpdater",
            "AtomicLong", "AtomicLongArray", "AtomicLongFieldUpdater", "AtomicMarkableReference",
            "AtomicReference", "AtomicReferenceArray", "AtomicReferenceFieldUpdater",
            "AtomicStampedReference",
        ],
    ),
    (
        "java.util.concurrent",
        &[
            "BlockingDeque", "BlockingQueue", "Callable", "CompletionService", "ConcurrentMap",
            "ConcurrentNavigableMap", "Delayed", "Executor", "ExecutorService", "Future",
            "RejectedExecutionHandler", "RunnableFuture", "RunnableScheduledFuture",
            "ScheduledExecutorService", "ScheduledFuture", "ThreadFactory",
            "AbstractExecutorService", "ArrayBlockingQueue", "ConcurrentHashMap",
            "ConcurrentLinkedQueue", "ConcurrentSkipListMap", "ConcurrentSkipListSet",
            "CopyOnWriteArrayList", "CopyOnWriteArraySet", "CountDownLatch", "CyclicBarrier",
            "DelayQueue", "Exchanger", "ExecutorCompletionService", "Executors", "FutureTask",
            "LinkedBlockingDeque", "LinkedBlockingQueue", "PriorityBlockingQueue",
            "ScheduledThreadPoolExecutor", "Semaphore", "SynchronousQueue", "ThreadPoolExecutor",
            "TimeUnit", "BrokenBarrierException", "CancellationException", "ExecutionException",
            "RejectedExecutionException", "TimeoutException",
        ],
    ),
    (
        "java.util",
        &[
            "Collection", "Comparator", "Deque", "Enumeration", "EventListener", "Formattable",
            "Iterator", "List", "ListIterator", "Map", "NavigableMap", "NavigableSet", "Observer",
            "Queue", "RandomAccess", "Set", "SortedMap", "SortedSet", "AbstractCollection",
            "AbstractList", "AbstractMap", "AbstractQueue", "AbstractSequentialList",
            "AbstractSet", "ArrayDeque", "ArrayList", "Arrays", "BitSet", "Calendar",
            "Collections", "Currency", "Date", "Dictionary", "EnumMap", "EnumSet",
            "EventListenerProxy", "EventObject", "FormattableFlags", "Formatter",
            "GregorianCalendar", "HashMap", "HashSet", "Hashtable", "IdentityHashMap",
            "LinkedHashMap", "LinkedHashSet", "LinkedList", "ListResourceBundle", "Locale",
            "Observable", "PriorityQueue", "Properties", "PropertyPermission",
            "PropertyResourceBundle", "Random", "ResourceBundle", "Scanner", "ServiceLoader",
            "SimpleTimeZone", "Stack", "StringTokenizer", "Timer", "TimerTask", "TimeZone",
            "TreeMap", "TreeSet", "UUID", "Vector", "WeakHashMap",
            "ConcurrentModificationException", "DuplicateFormatFlagsException",
            "EmptyStackException", "FormatFlagsConversionMismatchException",
            "FormatterClosedException", "IllegalFormatCodePointException",
            "IllegalFormatConversionException", "IllegalFormatException",
            "IllegalFormatFlagsException", "IllegalFormatPrecisionException",
            "IllegalFormatWidthException", "InputMismatchException",
            "InvalidPropertiesFormatException", "MissingFormatArgumentException",
            "MissingFormatWidthException", "MissingResourceException", "NoSuchElementException",
            "TooManyListenersException", "UnknownFormatConversionException",
            "UnknownFormatFlagsException", "ServiceConfigurationError",
        ],
    ),
    (
        "java.text.spi",
        &[
            "BreakIteratorProvider", "CollatorProvider", "DateFormatProvider",
            "DateFormatSymbolsProvider", "DecimalFormatSymbolsProvider", "NumberFormatProvider",
        ],
    ),
    (
        "java.text",
        &[
            "AttributedCharacterIterator", "CharacterIterator", "Annotation", "AttributedString",
            "Bidi", "BreakIterator", "ChoiceFormat", "CollationElementIterator", "CollationKey",
            "Collator", "DateFormat", "DateFormatSymbols", "DecimalFormat",
            "DecimalFormatSymbols", "FieldPosition", "Format", "MessageFormat", "Normalizer",
            "NumberFormat", "ParsePosition", "RuleBasedCollator", "SimpleDateFormat",
            "StringCharacterIterator", "ParseException",
        ],
    ),
    (
        "java.nio.charset.spi",
        &[
            "CharsetProvider",
        ],
    ),
    (
        "java.nio.charset",
        &[
            "Charset", "CharsetDecoder", "CharsetEncoder", "CoderResult", "CodingErrorAction",
            "CharacterCodingException", "IllegalCharsetNameException", "MalformedInputException",
            "UnmappableCharacterException", "UnsupportedCharsetException",
            "CoderMalfunctionError",
        ],
    ),
    (
        "java.nio.channels.spi",
        &[
            "AbstractInterruptibleChannel", "AbstractSelectableChannel", "AbstractSelectionKey",
            "AbstractSelector", "SelectorProvider",
        ],
    ),
    (
        "java.nio.channels",
        &[
            "ByteChannel", "Channel", "GatheringByteChannel", "InterruptibleChannel",
            "ReadableByteChannel", "ScatteringByteChannel", "WritableByteChannel", "Channels",
            "DatagramChannel", "FileChannel", "FileLock", "Pipe", "SelectableChannel",
            "SelectionKey", "Selector", "ServerSocketChannel", "SocketChannel",
            "AlreadyConnectedException", "AsynchronousCloseException", "CancelledKeyException",
            "ClosedByInterruptException", "ClosedChannelException", "ClosedSelectorException",
            "ConnectionPendingException", "FileLockInterruptionException",
            "IllegalBlockingModeException", "IllegalSelectorException",
            "NoConnectionPendingException", "NonReadableChannelException",
            "NonWritableChannelException", "NotYetBoundException", "NotYetConnectedException",
            "OverlappingFileLockException", "UnresolvedAddressException",
            "UnsupportedAddressTypeException",
        ],
    ),
    (
        "java.nio",
        &[
            "Buffer", "ByteBuffer", "ByteOrder", "CharBuffer", "DoubleBuffer", "FloatBuffer",
            "IntBuffer", "LongBuffer", "MappedByteBuffer", "ShortBuffer",
            "BufferOverflowException", "BufferUnderflowException", "InvalidMarkException",
            "ReadOnlyBufferException",
        ],
    ),
    (
        "java.net",
        &[
            "ContentHandlerFactory", "CookiePolicy", "CookieStore", "DatagramSocketImplFactory",
            "FileNameMap", "SocketImplFactory", "SocketOptions", "URLStreamHandlerFactory",
            "Authenticator", "CacheRequest", "CacheResponse", "ContentHandler", "CookieHandler",
            "CookieManager", "DatagramPacket", "DatagramSocket", "DatagramSocketImpl",
            "HttpCookie", "HttpURLConnection", "IDN", "Inet4Address", "Inet6Address",
            "InetAddress", "InetSocketAddress", "InterfaceAddress", "JarURLConnection",
            "MulticastSocket", "NetPermission", "NetworkInterface", "PasswordAuthentication",
            "Proxy", "ProxySelector", "ResponseCache", "SecureCacheResponse", "ServerSocket",
            "Socket", "SocketAddress", "SocketImpl", "SocketPermission", "URI", "URL",
            "URLClassLoader", "URLConnection", "URLDecoder", "URLEncoder", "URLStreamHandler",
            "BindException", "ConnectException", "HttpRetryException", "MalformedURLException",
            "NoRouteToHostException", "PortUnreachableException", "ProtocolException",
            "SocketException", "SocketTimeoutException", "UnknownHostException",
            "UnknownServiceException", "URISyntaxException",
        ],
    ),
    (
        "java.math",
        &[
            "BigDecimal", "BigInteger", "MathContext", "RoundingMode",
        ],
    ),
    (
        "java.lang.reflect",
        &[
            "AnnotatedElement", "GenericArrayType", "GenericDeclaration", "InvocationHandler",
            "Member", "ParameterizedType", "Type", "TypeVariable", "WildcardType",
            "AccessibleObject", "Array", "Constructor", "Field", "Method", "Modifier", "Proxy",
            "ReflectPermission", "InvocationTargetException",
            "MalformedParameterizedTypeException", "UndeclaredThrowableException",
            "GenericSignatureFormatError",
        ],
    ),
    (
        "java.lang.ref",
        &[
            "PhantomReference", "Reference", "ReferenceQueue", "SoftReference", "WeakReference",
        ],
    ),
    (
        "java.lang.management",
        &[
            "ClassLoadingMXBean", "CompilationMXBean", "GarbageCollectorMXBean",
            "MemoryManagerMXBean", "MemoryMXBean", "MemoryPoolMXBean", "OperatingSystemMXBean",
            "RuntimeMXBean", "ThreadMXBean", "LockInfo", "ManagementFactory",
            "ManagementPermission", "MemoryNotificationInfo", "MemoryUsage", "MonitorInfo",
            "ThreadInfo", "MemoryType",
        ],
    ),
    (
        "java.lang.instrument",
        &[
            "ClassFileTransformer", "Instrumentation", "ClassDefinition",
            "IllegalClassFormatException", "UnmodifiableClassException",
        ],
    ),
    (
        "java.lang.annotation",
        &[
            "Annotation", "ElementType", "RetentionPolicy", "AnnotationTypeMismatchException",
            "IncompleteAnnotationException", "AnnotationFormatError", "Documented", "Inherited",
            "Retention", "Target",
        ],
    ),
    (
        "java.io",
        &[
            "Closeable", "DataInput", "DataOutput", "Externalizable", "FileFilter",
            "FilenameFilter", "Flushable", "ObjectInput", "ObjectInputValidation", "ObjectOutput",
            "ObjectStreamConstants", "Serializable", "BufferedInputStream",
            "BufferedOutputStream", "BufferedReader", "BufferedWriter", "ByteArrayInputStream",
            "ByteArrayOutputStream", "CharArrayReader", "CharArrayWriter", "Console",
            "DataInputStream", "DataOutputStream", "File", "FileDescriptor", "FileInputStream",
            "FileOutputStream", "FilePermission", "FileReader", "FileWriter", "FilterInputStream",
            "FilterOutputStream", "FilterReader", "FilterWriter", "InputStream",
            "InputStreamReader", "LineNumberInputStream", "LineNumberReader", "ObjectInputStream",
            "ObjectOutputStream", "ObjectStreamClass", "ObjectStreamField", "OutputStream",
            "OutputStreamWriter", "PipedInputStream", "PipedOutputStream", "PipedReader",
            "PipedWriter", "PrintStream", "PrintWriter", "PushbackInputStream", "PushbackReader",
            "RandomAccessFile", "Reader", "SequenceInputStream", "SerializablePermission",
            "StreamTokenizer", "StringBufferInputStream", "StringReader", "StringWriter",
            "Writer", "CharConversionException", "EOFException", "FileNotFoundException",
            "InterruptedIOException", "InvalidClassException", "InvalidObjectException",
            "IOException", "NotActiveException", "NotSerializableException",
            "ObjectStreamException", "OptionalDataException", "StreamCorruptedException",
            "SyncFailedException", "UnsupportedEncodingException", "UTFDataFormatException",
            "WriteAbortedException", "IOError",
        ],
    ),
];
